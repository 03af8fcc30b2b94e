// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager client for CLI commands: connect to the control socket,
//! auto-starting the daemon when it is not running.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use lspc_core::{RuntimePaths, MANAGER_STARTUP_ERROR, MANAGER_STARTUP_MARKER};
use thiserror::Error;
use tokio::net::UnixStream;
use tracing::debug;

use crate::env;
use crate::http::HttpClient;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    RuntimeDir(#[from] lspc_core::RuntimePathsError),

    #[error("Failed to start manager: {0}")]
    ManagerStartFailed(String),

    #[error("Connection timeout waiting for manager to start")]
    ManagerStartTimeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client bound to the manager's control socket.
pub struct ManagerClient {
    http: HttpClient,
}

impl ManagerClient {
    /// Connect to the manager, auto-starting it when the control socket is
    /// not accepting. The spawned daemon is fully detached: CLI exit must
    /// not take it down.
    pub async fn connect_or_start() -> Result<Self, ClientError> {
        let paths = RuntimePaths::resolve()?;
        let socket = paths.manager_socket();

        if is_socket_alive(&socket).await {
            return Ok(Self { http: HttpClient::new(socket) });
        }

        debug!("manager socket not live, spawning lspcd");
        let child = start_manager_background()?;
        wait_manager_socket(&paths, &socket, child).await?;
        Ok(Self { http: HttpClient::new(socket) })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

async fn is_socket_alive(path: &Path) -> bool {
    UnixStream::connect(path).await.is_ok()
}

/// Spawn the manager detached (null stdio, own process group).
fn start_manager_background() -> Result<std::process::Child, ClientError> {
    use std::os::unix::process::CommandExt;

    let program = find_manager_binary();
    Command::new(&program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .map_err(|e| ClientError::ManagerStartFailed(format!("{}: {}", program.display(), e)))
}

/// Poll the control socket until it accepts, watching the spawned process
/// for an early exit. Racing CLIs may each spawn a manager; only one binds
/// the socket and the losers exit quickly, which is fine as long as the
/// socket comes up.
async fn wait_manager_socket(
    paths: &RuntimePaths,
    socket: &Path,
    mut child: std::process::Child,
) -> Result<(), ClientError> {
    let deadline = tokio::time::Instant::now() + env::socket_wait();

    loop {
        if is_socket_alive(socket).await {
            return Ok(());
        }

        // Our spawn may have exited: either it lost the bind race to a
        // sibling (socket will come up momentarily) or startup failed.
        if let Ok(Some(status)) = child.try_wait() {
            if is_socket_alive(socket).await {
                return Ok(());
            }
            if let Some(error) = read_startup_error(paths) {
                return Err(ClientError::ManagerStartFailed(error));
            }
            if !status.success() {
                // Give the log a moment to surface the failure
                tokio::time::sleep(env::poll_interval()).await;
                if let Some(error) = read_startup_error(paths) {
                    return Err(ClientError::ManagerStartFailed(error));
                }
            }
        }

        if tokio::time::Instant::now() >= deadline {
            return match read_startup_error(paths) {
                Some(error) => Err(ClientError::ManagerStartFailed(error)),
                None => Err(ClientError::ManagerStartTimeout),
            };
        }
        tokio::time::sleep(env::poll_interval()).await;
    }
}

/// Find the lspcd binary: explicit override, then a sibling of the current
/// executable, then PATH.
fn find_manager_binary() -> PathBuf {
    if let Some(path) = env::manager_binary() {
        return path;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("lspcd");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    PathBuf::from("lspcd")
}

/// Read the startup error for the most recent startup attempt, if any.
fn read_startup_error(paths: &RuntimePaths) -> Option<String> {
    let log = std::fs::read_to_string(paths.manager_log()).ok()?;
    parse_startup_error(&log)
}

/// Extract the error line following the last startup marker in the manager
/// log. Returns `None` when the last attempt logged no startup error.
fn parse_startup_error(log: &str) -> Option<String> {
    let start = log.rfind(MANAGER_STARTUP_MARKER)?;
    log[start..]
        .lines()
        .find_map(|line| line.strip_prefix(MANAGER_STARTUP_ERROR))
        .map(str::to_string)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
