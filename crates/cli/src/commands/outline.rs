// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc outline` - Hierarchical symbol outline for a file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lspc_api::{OutlineRequest, OutlineResponse};

use crate::managed::{absolutize, capability_client};

#[derive(Args)]
pub struct OutlineArgs {
    /// Path to the file to get the symbol outline for
    pub file: PathBuf,

    /// Show all symbols including local variables and parameters
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Path to the project root, overriding marker discovery
    #[arg(long)]
    pub project: Option<PathBuf>,
}

pub async fn outline(args: OutlineArgs) -> Result<()> {
    let file = absolutize(&args.file);
    let client = capability_client(&file, args.project.as_deref()).await?;
    let mut resp: OutlineResponse =
        client.post("/capability/outline", &OutlineRequest { file_path: file }).await?;

    if resp.items.is_empty() {
        println!("Warning: No symbols found");
        return Ok(());
    }

    if !args.all {
        resp.items.retain(|item| item.kind.is_structural());
        if resp.items.is_empty() {
            println!("Warning: No symbols found (use --all to show local variables)");
            return Ok(());
        }
    }

    println!("{}", resp.format());
    Ok(())
}
