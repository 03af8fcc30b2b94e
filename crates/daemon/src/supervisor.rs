// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor for one managed language-server child.
//!
//! Owns the child process end-to-end: spawn, readiness, idle deadline,
//! graceful stop, and teardown. State machine:
//!
//! ```text
//!  Starting ── socket accepts ─────────────▶ Ready
//!  Starting ── child exits / spawn fail ───▶ Gone
//!  Ready    ── idle deadline passed ───────▶ Draining
//!  Ready    ── stop() called ──────────────▶ Draining
//!  Ready    ── child exits unexpectedly ───▶ Draining
//!  Draining ── child exited, socket gone ──▶ Gone
//! ```
//!
//! A crashed child is not restarted; the next `/create` for the same target
//! spawns a fresh one.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use lspc_api::ManagedClientInfo;
use lspc_core::{ClientId, ClientTarget};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::net::UnixStream;
use tokio::process::{Child, Command};
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::env;
use crate::lifecycle::Config;

/// Lifecycle state of a managed child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    Starting,
    Ready,
    Draining,
    Gone,
}

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("Failed to open client log at {0}: {1}")]
    LogFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to spawn `{0}`: {1}")]
    Spawn(String, #[source] std::io::Error),
}

/// Owner of one language-server child process.
pub struct Supervisor {
    id: ClientId,
    target: ClientTarget,
    uds_path: PathBuf,
    log_path: PathBuf,
    idle_window: Duration,
    deadline: Mutex<Instant>,
    state: Mutex<ChildState>,
    stop: Notify,
}

impl Supervisor {
    /// Derive id and paths for `target`. Does not start the child.
    pub fn new(target: ClientTarget, config: &Config) -> Self {
        let id = ClientId::for_target(&target);
        let uds_path = config.paths.client_socket(&id);
        let log_path = config.paths.client_log(&id);
        Self {
            id,
            target,
            uds_path,
            log_path,
            idle_window: config.idle_window,
            deadline: Mutex::new(Instant::now() + config.idle_window),
            state: Mutex::new(ChildState::Starting),
            stop: Notify::new(),
        }
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn uds_path(&self) -> &Path {
        &self.uds_path
    }

    pub fn state(&self) -> ChildState {
        *self.state.lock()
    }

    /// Snapshot for `/list` and `/create` responses.
    pub fn info(&self) -> ManagedClientInfo {
        let remaining = self.deadline.lock().saturating_duration_since(Instant::now());
        ManagedClientInfo {
            project_path: self.target.project_path.clone(),
            language: self.target.kind.name().to_string(),
            remaining_time: remaining.as_secs_f64(),
        }
    }

    /// Push the idle deadline forward by the full idle window. Safe to call
    /// from any task while `run` is active.
    pub fn reset_idle(&self) {
        *self.deadline.lock() = Instant::now() + self.idle_window;
    }

    /// Request graceful shutdown. Idempotent.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Spawn the child process bound to this supervisor's socket, with its
    /// stdout/stderr redirected to the per-client log file.
    pub fn spawn(&self) -> Result<Child, SupervisorError> {
        // A socket file left behind by a crashed predecessor would make the
        // child's bind fail.
        if self.uds_path.exists() {
            let _ = std::fs::remove_file(&self.uds_path);
        }

        let invocation =
            self.target.kind.server_invocation(&self.target.project_path, &self.uds_path);

        let log = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SupervisorError::LogFile(self.log_path.clone(), e))?;
        let log_err =
            log.try_clone().map_err(|e| SupervisorError::LogFile(self.log_path.clone(), e))?;

        info!(id = %self.id, program = %invocation.program, "spawning client");
        Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SupervisorError::Spawn(invocation.program.clone(), e))
    }

    /// Drive the child to completion. Returns only when the child has exited
    /// and the socket file is unlinked.
    pub async fn run(&self, mut child: Child) {
        loop {
            let deadline = *self.deadline.lock();
            let starting = self.state() == ChildState::Starting;
            tokio::select! {
                status = child.wait() => {
                    match status {
                        Ok(status) if self.state() == ChildState::Draining => {
                            debug!(id = %self.id, %status, "client exited");
                        }
                        Ok(status) => {
                            warn!(id = %self.id, %status, "client exited unexpectedly");
                            self.set_state(ChildState::Draining);
                        }
                        Err(e) => warn!(id = %self.id, error = %e, "failed to wait for client"),
                    }
                    break;
                }
                _ = self.stop.notified() => {
                    info!(id = %self.id, "stop requested");
                    self.drain(&mut child).await;
                    break;
                }
                _ = tokio::time::sleep_until(deadline) => {
                    // reset_idle may have pushed the deadline while we slept
                    if Instant::now() >= *self.deadline.lock() {
                        info!(id = %self.id, "idle window elapsed");
                        self.drain(&mut child).await;
                        break;
                    }
                }
                _ = wait_socket_accept(&self.uds_path), if starting => {
                    debug!(id = %self.id, "client socket accepting");
                    self.set_state(ChildState::Ready);
                }
            }
        }

        // Terminal step: the socket file must not outlive the supervisor.
        if let Err(e) = std::fs::remove_file(&self.uds_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(id = %self.id, error = %e, "failed to unlink client socket");
            }
        }
        self.set_state(ChildState::Gone);
    }

    fn set_state(&self, next: ChildState) {
        *self.state.lock() = next;
    }

    /// SIGTERM, bounded wait, then SIGKILL.
    async fn drain(&self, child: &mut Child) {
        self.set_state(ChildState::Draining);

        if let Some(pid) = child.id() {
            if let Err(e) = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                debug!(id = %self.id, error = %e, "SIGTERM failed");
            }
        }

        if tokio::time::timeout(env::drain_timeout(), child.wait()).await.is_err() {
            warn!(id = %self.id, "grace period elapsed, killing client");
            let _ = child.kill().await;
        }
    }
}

/// Poll `path` until it accepts a connection.
async fn wait_socket_accept(path: &Path) {
    loop {
        if UnixStream::connect(path).await.is_ok() {
            return;
        }
        tokio::time::sleep(env::poll_interval()).await;
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
