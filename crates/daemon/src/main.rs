// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LSP Manager Daemon (lspcd)
//!
//! Typically started by the `lspc` CLI on first connect and left to idle;
//! managed children are torn down individually when their idle windows
//! elapse. Listens for control-plane requests on a Unix socket.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use lspc_core::{MANAGER_STARTUP_ERROR, MANAGER_STARTUP_MARKER};
use lspc_daemon::{env, http, lifecycle, Config, LifecycleError, ManagerCtx};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before touching the runtime directory
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("lspcd {VERSION}");
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("lspcd {VERSION}");
                println!("LSP manager daemon - pools warm language-server processes per project");
                println!();
                println!("USAGE:");
                println!("    lspcd");
                println!();
                println!("The daemon is typically started by the `lspc` CLI and should not");
                println!("be invoked directly. It listens on a Unix socket for requests");
                println!("from `lspc`.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: lspcd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;

    // Rotate log file if it has grown too large
    rotate_log_if_needed(&config.paths.manager_log());

    // Write startup marker to log (before tracing setup, so the CLI can find it)
    write_startup_marker(&config)?;

    let log_guard = setup_logging(&config)?;

    info!("Starting manager daemon");

    let listener = match lifecycle::startup(&config).await {
        Ok(listener) => listener,
        Err(LifecycleError::AlreadyRunning(path)) => {
            eprintln!("lspcd is already running on {}", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config, &e);
            error!("Failed to start manager: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    let ctx = ManagerCtx::new(config.clone());
    let app = http::router(Arc::clone(&ctx));

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
    };

    info!("Manager ready, listening on {}", config.paths.manager_socket().display());

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    // Defensive sweep: idle teardown normally reaps children one by one, but
    // a terminating daemon must not leave live children behind.
    ctx.stop_all();
    ctx.wait_drained(env::drain_timeout() * 2).await;
    lifecycle::cleanup(&config);

    info!("Manager stopped");
    Ok(())
}

/// Maximum log file size before rotation (10 MB).
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rotated log files to keep (manager.log.1, .2, .3).
const MAX_ROTATED_LOGS: u32 = 3;

/// Rotate the manager log file if it exceeds [`MAX_LOG_SIZE`].
///
/// Shifts `manager.log` → `manager.log.1` → `manager.log.2` → `manager.log.3`,
/// deleting the oldest. Best-effort: rotation failures are silently ignored
/// so the daemon still starts.
fn rotate_log_if_needed(log_path: &std::path::Path) {
    let size = match std::fs::metadata(log_path) {
        Ok(m) => m.len(),
        Err(_) => return,
    };

    if size < MAX_LOG_SIZE {
        return;
    }

    let log_str = log_path.display().to_string();

    for i in (1..MAX_ROTATED_LOGS).rev() {
        let from = format!("{log_str}.{i}");
        let to = format!("{log_str}.{}", i + 1);
        let _ = std::fs::rename(&from, &to);
    }

    let _ = std::fs::rename(log_path, format!("{log_str}.1"));
}

/// Write startup marker to the log file (appends to existing log)
fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;

    let log_path = config.paths.manager_log();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Append marker with PID, followed by a blank line so the marker and any
    // subsequent ERROR line appear on non-consecutive lines when scanning.
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&log_path)?;
    writeln!(file, "{}{}) ---\n", MANAGER_STARTUP_MARKER, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to the log file.
/// This ensures the error is visible to the CLI even if the process exits quickly.
fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.paths.manager_log())
    else {
        return;
    };
    let _ = writeln!(file, "{MANAGER_STARTUP_ERROR}{error}");
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_path = config.paths.manager_log();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("manager.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();

    Ok(guard)
}
