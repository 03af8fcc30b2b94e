// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed set of supported language servers and their project markers.
//!
//! Resolution iterates kinds in registration order; the first kind whose
//! marker walk succeeds wins. Order therefore matters: TypeScript and Deno
//! are registered before JavaScript so a `tsconfig.json` or `deno.json`
//! project is not claimed by the bare `package.json` matcher.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One supported language-server kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageKind {
    Python,
    Go,
    Rust,
    TypeScript,
    Deno,
    JavaScript,
    Java,
}

/// Registration order for target resolution.
const REGISTERED: &[LanguageKind] = &[
    LanguageKind::Python,
    LanguageKind::Go,
    LanguageKind::Rust,
    LanguageKind::TypeScript,
    LanguageKind::Deno,
    LanguageKind::JavaScript,
    LanguageKind::Java,
];

impl LanguageKind {
    /// All kinds, in registration order.
    pub fn registered() -> &'static [LanguageKind] {
        REGISTERED
    }

    /// Stable lowercase token used in client ids, `server list` output,
    /// and the `--language` argument of the child server.
    pub fn name(&self) -> &'static str {
        match self {
            LanguageKind::Python => "python",
            LanguageKind::Go => "go",
            LanguageKind::Rust => "rust",
            LanguageKind::TypeScript => "typescript",
            LanguageKind::Deno => "deno",
            LanguageKind::JavaScript => "javascript",
            LanguageKind::Java => "java",
        }
    }

    /// Project-root markers checked by [`LanguageKind::is_project_root`].
    fn markers(&self) -> &'static [&'static str] {
        match self {
            LanguageKind::Python => &["pyproject.toml"],
            LanguageKind::Go => &["go.mod"],
            LanguageKind::Rust => &["Cargo.toml"],
            LanguageKind::TypeScript => &["tsconfig.json"],
            LanguageKind::Deno => &["deno.json", "deno.jsonc"],
            LanguageKind::JavaScript => &["package.json"],
            LanguageKind::Java => &["pom.xml", "build.gradle", "build.gradle.kts"],
        }
    }

    /// Whether `dir` is a project root for this language.
    pub fn is_project_root(&self, dir: &Path) -> bool {
        dir.is_dir() && self.markers().iter().any(|m| dir.join(m).is_file())
    }

    /// Walk `path` and its ancestors looking for this language's marker.
    ///
    /// A directory path is treated the same as a file inside it: the walk
    /// starts at the path itself when it is a directory, else at its parent.
    pub fn find_project_root(&self, path: &Path) -> Option<PathBuf> {
        let start = if path.is_dir() { path } else { path.parent()? };
        start.ancestors().find(|dir| self.is_project_root(dir)).map(Path::to_path_buf)
    }

    /// Build the invocation for this language's child server, binding it to
    /// `uds_path` for the given project root.
    ///
    /// Every kind currently routes through the `lspc-server` wrapper binary;
    /// `LSPC_SERVER_BINARY` overrides the program for all kinds (used by the
    /// end-to-end specs to substitute a stub).
    pub fn server_invocation(&self, project_path: &Path, uds_path: &Path) -> ServerInvocation {
        let program = std::env::var("LSPC_SERVER_BINARY")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "lspc-server".to_string());
        ServerInvocation {
            program,
            args: vec![
                "--language".to_string(),
                self.name().to_string(),
                "--project".to_string(),
                project_path.display().to_string(),
                "--uds".to_string(),
                uds_path.display().to_string(),
            ],
        }
    }
}

impl std::fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete child-server command line: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInvocation {
    pub program: String,
    pub args: Vec<String>,
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
