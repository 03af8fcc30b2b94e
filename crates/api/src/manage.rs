// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DTOs for the manager control plane (`/create`, `/delete`, `/list`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Snapshot of one managed child, as returned by every control-plane route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedClientInfo {
    pub project_path: PathBuf,
    pub language: String,
    /// Seconds until idle teardown, clamped at zero.
    pub remaining_time: f64,
}

impl ManagedClientInfo {
    /// Render infos as the `server list` table: one row per child.
    pub fn format(infos: &[ManagedClientInfo]) -> String {
        infos
            .iter()
            .map(|info| {
                format!(
                    "{:<10} {} ({})",
                    info.language,
                    info.project_path.display(),
                    lspc_core::format_remaining(info.remaining_time)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClientResponse {
    pub uds_path: PathBuf,
    pub info: ManagedClientInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteClientRequest {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteClientResponse {
    /// Pre-stop snapshot of the stopped child; `null` when nothing matched.
    pub info: Option<ManagedClientInfo>,
}

/// Body of every non-2xx control-plane response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
#[path = "manage_tests.rs"]
mod tests;
