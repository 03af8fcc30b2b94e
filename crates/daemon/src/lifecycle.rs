// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: configuration, startup, and teardown of the control
//! socket.
//!
//! Startup arbitration between racing daemons is done by the socket itself:
//! a live socket means another manager is already serving, a dead socket
//! file is stale and gets unlinked, and losing the bind race is a quick
//! non-zero exit.

use std::path::PathBuf;
use std::time::Duration;

use lspc_core::RuntimePaths;
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::info;

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime directory layout (sockets, logs)
    pub paths: RuntimePaths,
    /// Idle window granted to each managed child
    pub idle_window: Duration,
}

impl Config {
    /// Load configuration for the user-level daemon from the environment.
    ///
    /// One daemon serves all projects for a user.
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self { paths: RuntimePaths::resolve()?, idle_window: env::idle_timeout() })
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    RuntimeDir(#[from] lspc_core::RuntimePathsError),

    #[error("Manager already running on {0}")]
    AlreadyRunning(PathBuf),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Prepare the runtime directory and bind the control socket.
pub async fn startup(config: &Config) -> Result<UnixListener, LifecycleError> {
    // 1. Create the runtime tree (sockets and logs)
    std::fs::create_dir_all(config.paths.clients_dir())?;
    std::fs::create_dir_all(config.paths.client_logs_dir())?;

    let socket_path = config.paths.manager_socket();

    // 2. A live socket means another manager already owns this runtime dir
    if socket_path.exists() {
        if std::os::unix::net::UnixStream::connect(&socket_path).is_ok() {
            return Err(LifecycleError::AlreadyRunning(socket_path));
        }
        // Stale socket from a crashed predecessor
        info!("Removing stale control socket at {}", socket_path.display());
        std::fs::remove_file(&socket_path)?;
    }

    // 3. Bind (losing a concurrent bind race surfaces here)
    let listener = UnixListener::bind(&socket_path)
        .map_err(|e| LifecycleError::BindFailed(socket_path.clone(), e))?;

    info!("Manager bound to {}", socket_path.display());
    Ok(listener)
}

/// Remove the control socket on the way out. Best-effort.
pub fn cleanup(config: &Config) {
    let socket_path = config.paths.manager_socket();
    if socket_path.exists() {
        let _ = std::fs::remove_file(&socket_path);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
