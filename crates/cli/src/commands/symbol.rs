// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc symbol` - Detailed symbol information at a location

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lspc_api::{SymbolRequest, SymbolResponse};

use crate::managed::{capability_client, create_locate};

#[derive(Args)]
pub struct SymbolArgs {
    /// Location of the symbol, e.g. `src/main.rs:12:4`
    #[arg(short = 'l', long)]
    pub locate: String,

    /// Path to the project root, overriding marker discovery
    #[arg(long)]
    pub project: Option<PathBuf>,
}

pub async fn symbol(args: SymbolArgs) -> Result<()> {
    let locate = create_locate(&args.locate)?;
    let client = capability_client(&locate.file_path, args.project.as_deref()).await?;
    let resp: SymbolResponse = client.post("/capability/symbol", &SymbolRequest { locate }).await?;

    if resp.name.is_empty() {
        println!("Warning: No symbol information found");
    } else {
        println!("{}", resp.format());
    }
    Ok(())
}
