// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared plumbing for capability commands: every command that talks to an
//! LSP capability resolves its path, asks the manager for the child socket,
//! waits for the socket to accept, and proxies one HTTP request to it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use lspc_api::{CreateClientRequest, CreateClientResponse};
use lspc_core::Locate;
use thiserror::Error;
use tokio::net::UnixStream;

use crate::client::ManagerClient;
use crate::env;
use crate::http::HttpClient;

#[derive(Debug, Error)]
#[error("Timed out after {timeout:?} waiting for socket {path}")]
pub struct WaitSocketError {
    pub path: PathBuf,
    pub timeout: Duration,
}

/// Poll `path` until it accepts a connection, up to `timeout`.
pub async fn wait_socket(path: &Path, timeout: Duration) -> Result<(), WaitSocketError> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if UnixStream::connect(path).await.is_ok() {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(WaitSocketError { path: path.to_path_buf(), timeout });
        }
        tokio::time::sleep(env::poll_interval()).await;
    }
}

/// Resolve a possibly-relative path against the current working directory.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map(|cwd| cwd.join(path)).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Obtain an HTTP client for the managed child serving `path`.
///
/// Auto-starts the manager, issues `/create`, and waits for the child's
/// socket to accept before handing it back.
pub async fn capability_client(path: &Path, project: Option<&Path>) -> Result<HttpClient> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let manager = ManagerClient::connect_or_start().await?;
    let resp: CreateClientResponse = manager
        .http()
        .post(
            "/create",
            &CreateClientRequest {
                path: absolutize(path),
                project_path: project.map(|p| absolutize(p)),
            },
        )
        .await?;

    wait_socket(&resp.uds_path, env::socket_wait())
        .await
        .context("language server did not come up")?;

    Ok(HttpClient::new(resp.uds_path))
}

/// Parse and validate a locate string: grammar, positive line numbers,
/// absolute existing file.
pub fn create_locate(input: &str) -> Result<Locate> {
    let mut locate = Locate::parse(input)?;
    locate.file_path = absolutize(&locate.file_path);
    if !locate.file_path.is_file() {
        bail!("File not found: {}", locate.file_path.display());
    }
    Ok(locate)
}

#[cfg(test)]
#[path = "managed_tests.rs"]
mod tests;
