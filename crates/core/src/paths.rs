// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime directory layout shared by the CLI and the manager daemon.
//!
//! Everything the system persists (sockets, logs) lives under one per-user
//! runtime root: `LSPC_RUNTIME_DIR` > `$XDG_RUNTIME_DIR/lspc` >
//! `~/.local/state/lspc`.

use std::path::PathBuf;

use thiserror::Error;

use crate::target::ClientId;

/// Startup marker prefix the daemon writes to its log before anything else.
/// The CLI uses it to find where the current startup attempt begins.
/// Full format: `--- lspcd: starting (pid: 12345) ---`
pub const MANAGER_STARTUP_MARKER: &str = "--- lspcd: starting (pid: ";

/// Prefix of the synchronous error line the daemon writes when startup fails.
pub const MANAGER_STARTUP_ERROR: &str = "ERROR Failed to start manager: ";

#[derive(Debug, Error)]
pub enum RuntimePathsError {
    #[error("Could not determine runtime directory (no LSPC_RUNTIME_DIR, XDG_RUNTIME_DIR, or HOME)")]
    NoRuntimeDir,
}

/// Resolved filesystem layout under the runtime root.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub runtime_dir: PathBuf,
}

impl RuntimePaths {
    /// Resolve the runtime root from the environment.
    pub fn resolve() -> Result<Self, RuntimePathsError> {
        if let Ok(dir) = std::env::var("LSPC_RUNTIME_DIR") {
            if !dir.is_empty() {
                return Ok(Self { runtime_dir: PathBuf::from(dir) });
            }
        }
        if let Ok(xdg) = std::env::var("XDG_RUNTIME_DIR") {
            if !xdg.is_empty() {
                return Ok(Self { runtime_dir: PathBuf::from(xdg).join("lspc") });
            }
        }
        let home = std::env::var("HOME").map_err(|_| RuntimePathsError::NoRuntimeDir)?;
        Ok(Self { runtime_dir: PathBuf::from(home).join(".local/state/lspc") })
    }

    /// Control-plane socket of the manager daemon.
    pub fn manager_socket(&self) -> PathBuf {
        self.runtime_dir.join("manager.sock")
    }

    /// Directory holding one socket per managed child.
    pub fn clients_dir(&self) -> PathBuf {
        self.runtime_dir.join("clients")
    }

    /// Socket path for one managed child.
    pub fn client_socket(&self, id: &ClientId) -> PathBuf {
        self.clients_dir().join(format!("{id}.sock"))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.runtime_dir.join("logs")
    }

    pub fn manager_log(&self) -> PathBuf {
        self.logs_dir().join("manager.log")
    }

    pub fn cli_log(&self) -> PathBuf {
        self.logs_dir().join("cli.log")
    }

    pub fn client_logs_dir(&self) -> PathBuf {
        self.logs_dir().join("clients")
    }

    /// Log file capturing one managed child's stdout and stderr.
    pub fn client_log(&self, id: &ClientId) -> PathBuf {
        self.client_logs_dir().join(format!("{id}.log"))
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
