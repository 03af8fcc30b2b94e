// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc doc` - Documentation and type information at a location

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lspc_api::{DocRequest, DocResponse};

use crate::managed::{capability_client, create_locate};

#[derive(Args)]
pub struct DocArgs {
    /// Location of the symbol, e.g. `src/main.rs:12:4`
    #[arg(short = 'l', long)]
    pub locate: String,

    /// Path to the project root, overriding marker discovery
    #[arg(long)]
    pub project: Option<PathBuf>,
}

pub async fn doc(args: DocArgs) -> Result<()> {
    let locate = create_locate(&args.locate)?;
    let client = capability_client(&locate.file_path, args.project.as_deref()).await?;
    let resp: DocResponse = client.post("/capability/hover", &DocRequest { locate }).await?;

    if resp.contents.is_empty() {
        println!("Warning: No documentation found");
    } else {
        println!("{}", resp.format());
    }
    Ok(())
}
