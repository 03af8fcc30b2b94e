// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client targets and their deterministic ids.
//!
//! A target pairs a language-server kind with a project root. Two paths that
//! resolve to the same target share one managed child, so the id must be a
//! pure function of the pair.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::language::LanguageKind;

/// A resolved `(language-server kind, project root)` pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTarget {
    pub kind: LanguageKind,
    pub project_path: PathBuf,
}

/// Deterministic identifier for a [`ClientTarget`].
///
/// Also used as the stem of the child's socket and log filenames, so it must
/// stay filesystem-safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn for_target(target: &ClientTarget) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(target.project_path.display().to_string().as_bytes());
        let digest = hasher.finalize();
        let mut short = String::with_capacity(16);
        for byte in &digest[..8] {
            short.push_str(&format!("{byte:02x}"));
        }
        ClientId(format!("{}-{}", target.kind.name(), short))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identify the client kind and project root for a file or directory path.
///
/// Kinds are tried in registration order; the first whose marker walk
/// succeeds wins. Returns `None` when no registered language matches.
pub fn find_target(path: &Path) -> Option<ClientTarget> {
    LanguageKind::registered().iter().find_map(|kind| {
        kind.find_project_root(path)
            .map(|project_path| ClientTarget { kind: *kind, project_path })
    })
}

/// Identify the client kind for a directory expected to be a project root.
///
/// Unlike [`find_target`] this does not walk ancestors: `project_path` itself
/// must carry a marker.
pub fn match_target(project_path: &Path) -> Option<ClientTarget> {
    LanguageKind::registered()
        .iter()
        .find(|kind| kind.is_project_root(project_path))
        .map(|kind| ClientTarget { kind: *kind, project_path: project_path.to_path_buf() })
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
