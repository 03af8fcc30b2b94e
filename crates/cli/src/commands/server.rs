// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lspc server` - Manage background LSP server processes

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use lspc_api::{
    CreateClientRequest, CreateClientResponse, DeleteClientRequest, DeleteClientResponse,
    ManagedClientInfo,
};

use crate::client::ManagerClient;
use crate::managed::absolutize;

#[derive(Subcommand)]
pub enum ServerCommand {
    /// List all currently running and managed LSP servers
    List,
    /// Start a background LSP server for the project containing the path
    Start {
        /// Path to a code file or project directory to start the LSP server for
        path: PathBuf,
        /// Path to the project root. If specified, start a server in this directory
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Stop the background LSP server for the project containing the path
    Stop {
        /// Path to a code file or project directory to stop the LSP server for
        path: PathBuf,
        /// Path to the project root
        #[arg(long)]
        project: Option<PathBuf>,
    },
}

pub async fn server(command: Option<ServerCommand>) -> Result<()> {
    match command.unwrap_or(ServerCommand::List) {
        ServerCommand::List => list().await,
        ServerCommand::Start { path, project } => start(path, project).await,
        ServerCommand::Stop { path, project } => stop(path, project).await,
    }
}

async fn list() -> Result<()> {
    let manager = ManagerClient::connect_or_start().await?;
    let servers: Vec<ManagedClientInfo> = manager.http().get("/list").await?;

    if servers.is_empty() {
        println!("No servers running.");
    } else {
        println!("{}", ManagedClientInfo::format(&servers));
    }
    Ok(())
}

async fn start(path: PathBuf, project: Option<PathBuf>) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let manager = ManagerClient::connect_or_start().await?;
    let resp: CreateClientResponse = manager
        .http()
        .post(
            "/create",
            &CreateClientRequest {
                path: absolutize(&path),
                project_path: project.map(|p| absolutize(&p)),
            },
        )
        .await?;

    println!("Success: Started server for {}", path.display());
    println!("{}", ManagedClientInfo::format(&[resp.info]));
    Ok(())
}

async fn stop(path: PathBuf, project: Option<PathBuf>) -> Result<()> {
    let manager = ManagerClient::connect_or_start().await?;
    let resp: DeleteClientResponse = manager
        .http()
        .delete(
            "/delete",
            &DeleteClientRequest {
                path: absolutize(&path),
                project_path: project.map(|p| absolutize(&p)),
            },
        )
        .await?;

    match resp.info {
        Some(info) => println!("Success: Stopped server for {}", info.project_path.display()),
        None => println!("Warning: No server running for {}", path.display()),
    }
    Ok(())
}
