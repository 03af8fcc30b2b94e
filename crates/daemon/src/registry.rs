// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The manager registry: client id → supervisor.
//!
//! All mutations go through one mutex, so a `/create` either observes an
//! existing supervisor or inserts a new one, never both. Entries are
//! inserted before the supervisor's run task is spawned; the run task's
//! teardown removes them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use lspc_api::{CreateClientResponse, ManagedClientInfo};
use lspc_core::{find_target, match_target, ClientId, ClientTarget};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

use crate::lifecycle::Config;
use crate::supervisor::{Supervisor, SupervisorError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No LSP client found for path: {0}")]
    NoMatch(PathBuf),

    #[error(transparent)]
    Spawn(#[from] SupervisorError),
}

/// Shared daemon context for all request handlers.
pub struct ManagerCtx {
    pub config: Config,
    registry: Mutex<HashMap<ClientId, Arc<Supervisor>>>,
}

impl ManagerCtx {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self { config, registry: Mutex::new(HashMap::new()) })
    }

    /// Resolve the target for a request: explicit project root when given,
    /// marker walk from the path otherwise.
    fn resolve(&self, path: &Path, project_path: Option<&Path>) -> Option<ClientTarget> {
        match project_path {
            Some(project) => match_target(project),
            None => find_target(path),
        }
    }

    fn lookup(&self, path: &Path, project_path: Option<&Path>) -> Option<Arc<Supervisor>> {
        let target = self.resolve(path, project_path)?;
        let id = ClientId::for_target(&target);
        self.registry.lock().get(&id).cloned()
    }

    /// Get-or-create the supervisor for a path. Reuse resets the idle
    /// deadline; creation spawns the child and inserts the registry entry
    /// before the run task starts.
    pub fn create_client(
        self: &Arc<Self>,
        path: &Path,
        project_path: Option<&Path>,
    ) -> Result<CreateClientResponse, RegistryError> {
        let target = self
            .resolve(path, project_path)
            .ok_or_else(|| RegistryError::NoMatch(path.to_path_buf()))?;
        let id = ClientId::for_target(&target);

        let mut registry = self.registry.lock();
        if let Some(existing) = registry.get(&id) {
            info!(%id, "reusing existing client");
            existing.reset_idle();
            return Ok(CreateClientResponse {
                uds_path: existing.uds_path().to_path_buf(),
                info: existing.info(),
            });
        }

        info!(%id, project = %target.project_path.display(), "creating new client");
        let supervisor = Arc::new(Supervisor::new(target, &self.config));
        let child = supervisor.spawn()?;
        registry.insert(id, Arc::clone(&supervisor));
        drop(registry);

        let ctx = Arc::clone(self);
        let sup = Arc::clone(&supervisor);
        tokio::spawn(async move {
            info!(id = %sup.id(), "running client");
            sup.run(child).await;
            info!(id = %sup.id(), "removing client");
            ctx.registry.lock().remove(sup.id());
        });

        Ok(CreateClientResponse {
            uds_path: supervisor.uds_path().to_path_buf(),
            info: supervisor.info(),
        })
    }

    /// Initiate graceful stop of the matching supervisor. Returns the
    /// pre-stop snapshot, or `None` when nothing matched; the registry entry
    /// itself is removed by the supervisor's teardown.
    pub fn delete_client(
        &self,
        path: &Path,
        project_path: Option<&Path>,
    ) -> Option<ManagedClientInfo> {
        let supervisor = self.lookup(path, project_path)?;
        info!(id = %supervisor.id(), "stopping client");
        let snapshot = supervisor.info();
        supervisor.stop();
        Some(snapshot)
    }

    /// Snapshot of every live supervisor.
    pub fn list_clients(&self) -> Vec<ManagedClientInfo> {
        self.registry.lock().values().map(|s| s.info()).collect()
    }

    /// Request graceful stop of every supervisor (daemon shutdown sweep).
    pub fn stop_all(&self) {
        for supervisor in self.registry.lock().values() {
            supervisor.stop();
        }
    }

    /// Wait until every run task has torn down, up to `timeout`.
    pub async fn wait_drained(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.registry.lock().is_empty() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.registry.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
