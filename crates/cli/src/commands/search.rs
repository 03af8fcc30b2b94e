// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc search` - Workspace-wide symbol search

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lspc_api::{SearchRequest, SearchResponse};

use crate::managed::capability_client;

#[derive(Args)]
pub struct SearchArgs {
    /// Symbol name or prefix to search for
    pub query: String,

    /// Path to the project root, overriding marker discovery
    #[arg(long)]
    pub project: Option<PathBuf>,
}

pub async fn search(args: SearchArgs) -> Result<()> {
    // Without an explicit project the search is anchored at the working
    // directory, like an editor would anchor at its workspace.
    let base = match &args.project {
        Some(project) => project.clone(),
        None => std::env::current_dir()?,
    };
    let client = capability_client(&base, args.project.as_deref()).await?;
    let resp: SearchResponse =
        client.post("/capability/search", &SearchRequest { query: args.query }).await?;

    if resp.symbols.is_empty() {
        println!("Warning: No symbols found");
    } else {
        println!("{}", resp.format());
    }
    Ok(())
}
