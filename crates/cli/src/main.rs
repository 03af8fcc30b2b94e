// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lspc - Command-line front-end for Language Server Protocol features.
//!
//! Every capability command routes through the manager daemon, which pools
//! one warm language-server child per `(language, project-root)` pair so
//! repeated invocations skip cold startup.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod env;
mod exit_error;
mod http;
mod managed;

use clap::{Parser, Subcommand};
use lspc_core::RuntimePaths;

use crate::exit_error::ExitError;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser)]
#[command(
    name = "lspc",
    version = VERSION,
    about = "Command-line front-end for Language Server Protocol features"
)]
struct Cli {
    /// Elevate log verbosity and surface full diagnostics on errors
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage background LSP server processes
    Server {
        #[command(subcommand)]
        command: Option<commands::server::ServerCommand>,
    },
    /// Get the hierarchical symbol outline (classes, functions, etc.) for a file
    Outline(commands::outline::OutlineArgs),
    /// Find the definition of the symbol at a specific location
    Definition(commands::definition::DefinitionArgs),
    /// Find all references to the symbol at a specific location
    Reference(commands::reference::ReferenceArgs),
    /// Get documentation and type information for a symbol at a specific location
    Doc(commands::doc::DocArgs),
    /// Get detailed symbol information at a specific location
    Symbol(commands::symbol::SymbolArgs),
    /// Locate a position or range in the codebase using a string syntax
    Locate(commands::locate::LocateArgs),
    /// Search for symbols across the workspace
    Search(commands::search::SearchArgs),
    /// Rename a symbol at a specific location
    Rename {
        #[command(subcommand)]
        command: commands::rename::RenameCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;
    let _log_guard = setup_logging(debug);

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            if let Some(exit) = e.downcast_ref::<ExitError>() {
                eprintln!("{}", exit.message);
                std::process::exit(exit.code);
            }
            if debug {
                eprintln!("Error: {e:?}");
            } else {
                eprintln!("Error: {e}");
                if let Ok(paths) = RuntimePaths::resolve() {
                    eprintln!("For more details, check the log at: {}", paths.cli_log().display());
                }
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Server { command } => commands::server::server(command).await,
        Command::Outline(args) => commands::outline::outline(args).await,
        Command::Definition(args) => commands::definition::definition(args).await,
        Command::Reference(args) => commands::reference::reference(args).await,
        Command::Doc(args) => commands::doc::doc(args).await,
        Command::Symbol(args) => commands::symbol::symbol(args).await,
        Command::Locate(args) => commands::locate::locate(args).await,
        Command::Search(args) => commands::search::search(args).await,
        Command::Rename { command } => commands::rename::rename(command).await,
    }
}

/// Log to `logs/cli.log`; `--debug` adds a stderr layer and raises the level.
/// Best-effort: a CLI that cannot log still works.
fn setup_logging(debug: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let paths = RuntimePaths::resolve().ok()?;
    let log_path = paths.cli_log();
    std::fs::create_dir_all(log_path.parent()?).ok()?;

    let file_appender = tracing_appender::rolling::never(
        log_path.parent()?,
        log_path.file_name()?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry =
        tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking));
    if debug {
        let _ = registry.with(fmt::layer().with_writer(std::io::stderr)).try_init();
    } else {
        let _ = registry.try_init();
    }

    Some(guard)
}
