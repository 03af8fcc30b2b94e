// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc rename` - Two-phase symbol rename: preview, then execute by id

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use lspc_api::{
    RenameExecuteRequest, RenameExecuteResponse, RenamePreviewRequest, RenamePreviewResponse,
};

use crate::exit_error::ExitError;
use crate::managed::{absolutize, capability_client, create_locate};

#[derive(Subcommand)]
pub enum RenameCommand {
    /// Preview the effects of renaming a symbol at a specific location
    Preview {
        /// The new name for the symbol
        new_name: String,
        /// Location of the symbol, e.g. `src/main.rs:12:4`
        #[arg(short = 'l', long)]
        locate: String,
        /// Path to the project root, overriding marker discovery
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Execute a rename operation using the ID from a previous preview
    Execute {
        /// Rename ID from a previous preview
        rename_id: String,
        /// File paths or glob patterns to exclude from the rename operation.
        /// Can be specified multiple times
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Workspace root the edits apply to (defaults to the working directory)
        #[arg(long)]
        workspace: Option<PathBuf>,
        /// Path to the project root, overriding marker discovery
        #[arg(long)]
        project: Option<PathBuf>,
    },
}

pub async fn rename(command: RenameCommand) -> Result<()> {
    match command {
        RenameCommand::Preview { new_name, locate, project } => {
            preview(new_name, locate, project).await
        }
        RenameCommand::Execute { rename_id, exclude, workspace, project } => {
            execute(rename_id, exclude, workspace, project).await
        }
    }
}

async fn preview(new_name: String, locate: String, project: Option<PathBuf>) -> Result<()> {
    let locate = create_locate(&locate)?;
    let client = capability_client(&locate.file_path, project.as_deref()).await?;
    let resp: RenamePreviewResponse = client
        .post("/capability/rename/preview", &RenamePreviewRequest { locate, new_name })
        .await?;

    if resp.edits.is_empty() {
        println!("Warning: No rename possibilities found at the location");
    } else {
        println!("{}", resp.format());
    }
    Ok(())
}

async fn execute(
    rename_id: String,
    exclude: Vec<String>,
    workspace: Option<PathBuf>,
    project: Option<PathBuf>,
) -> Result<()> {
    let workspace = match workspace {
        Some(path) => absolutize(&path),
        None => std::env::current_dir()?,
    };

    // Relative exclude entries are resolved against the CLI's working
    // directory before forwarding.
    let exclude_files = exclude.into_iter().map(|entry| normalize_exclude(&entry)).collect();

    let client = capability_client(&workspace, project.as_deref()).await?;
    let resp: RenameExecuteResponse = client
        .post(
            "/capability/rename/execute",
            &RenameExecuteRequest { rename_id, exclude_files, workspace: Some(workspace) },
        )
        .await?;

    if !resp.applied {
        return Err(ExitError::new(1, resp.format()).into());
    }
    println!("{}", resp.format());
    Ok(())
}

fn normalize_exclude(entry: &str) -> String {
    let path = std::path::Path::new(entry);
    if path.is_absolute() {
        entry.to_string()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path).display().to_string(),
            Err(_) => entry.to_string(),
        }
    }
}
