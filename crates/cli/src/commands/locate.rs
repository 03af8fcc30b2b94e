// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc locate` - Resolve a locate string against the codebase

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lspc_api::{LocateRequest, LocateResponse};

use crate::exit_error::ExitError;
use crate::managed::{capability_client, create_locate};

#[derive(Args)]
pub struct LocateArgs {
    /// The locate string to parse, e.g. `src/main.rs:12:4`
    pub locate: String,

    /// Verify the target exists in the file and show its context
    #[arg(short = 'c', long)]
    pub check: bool,

    /// Path to the project root, overriding marker discovery
    #[arg(long)]
    pub project: Option<PathBuf>,
}

pub async fn locate(args: LocateArgs) -> Result<()> {
    let locate = create_locate(&args.locate)?;
    let client = capability_client(&locate.file_path, args.project.as_deref()).await?;
    let resp: LocateResponse =
        client.post("/capability/locate", &LocateRequest { locate: locate.clone() }).await?;

    match resp.format() {
        Some(out) => println!("{out}"),
        None if args.check => {
            return Err(ExitError::new(1, format!("Target '{}' not found", args.locate)).into());
        }
        None => println!("{locate}"),
    }
    Ok(())
}
