// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DTOs for the child capability endpoints (`/capability/*`).
//!
//! The child processes wrap upstream LSP servers; these types mirror the
//! JSON those servers' HTTP façades accept and return. Each response type
//! carries a `format` renderer used verbatim by the CLI.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use lspc_core::Locate;

/// Subset of the LSP symbol taxonomy surfaced by outline/symbol/search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    Struct,
    EnumMember,
    TypeParameter,
}

impl SymbolKind {
    /// Kinds kept by the default outline view; the rest need `--all`.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Function
                | SymbolKind::Method
                | SymbolKind::Interface
                | SymbolKind::Enum
                | SymbolKind::Module
                | SymbolKind::Namespace
                | SymbolKind::Struct
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SymbolKind::File => "file",
            SymbolKind::Module => "module",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Package => "package",
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Field => "field",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Enum => "enum",
            SymbolKind::Interface => "interface",
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Struct => "struct",
            SymbolKind::EnumMember => "enum member",
            SymbolKind::TypeParameter => "type parameter",
        }
    }
}

/// A single resolved source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file_path: PathBuf,
    pub line: u32,
    pub col: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file_path.display(), self.line, self.col)
    }
}

// --- outline ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineRequest {
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineItem {
    pub name: String,
    pub kind: SymbolKind,
    pub start_line: u32,
    pub end_line: u32,
    /// Nesting depth in the symbol hierarchy, pre-flattened by the child.
    #[serde(default)]
    pub depth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineResponse {
    pub items: Vec<OutlineItem>,
}

impl OutlineResponse {
    pub fn format(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                let indent = "  ".repeat(item.depth as usize);
                let mut row = format!(
                    "{}{} {} [{}-{}]",
                    indent,
                    item.kind.name(),
                    item.name,
                    item.start_line,
                    item.end_line
                );
                if let Some(detail) = &item.detail {
                    row.push_str(&format!("  {detail}"));
                }
                row
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// --- hover / doc ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRequest {
    pub locate: Locate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocResponse {
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl DocResponse {
    pub fn format(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{}\n\n{}", symbol, self.contents),
            None => self.contents.clone(),
        }
    }
}

// --- symbol ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRequest {
    pub locate: Locate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolResponse {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

impl SymbolResponse {
    pub fn format(&self) -> String {
        let mut out = format!("{} {} @ {}", self.kind.name(), self.name, self.location);
        if let Some(container) = &self.container {
            out.push_str(&format!("\n  in {container}"));
        }
        out
    }
}

// --- definition / references ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionRequest {
    pub locate: Locate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionResponse {
    pub locations: Vec<Location>,
}

impl DefinitionResponse {
    pub fn format(&self) -> String {
        format_locations(&self.locations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRequest {
    pub locate: Locate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceResponse {
    pub locations: Vec<Location>,
}

impl ReferenceResponse {
    pub fn format(&self) -> String {
        format_locations(&self.locations)
    }
}

fn format_locations(locations: &[Location]) -> String {
    locations.iter().map(Location::to_string).collect::<Vec<_>>().join("\n")
}

// --- workspace search ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolHit {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub symbols: Vec<SymbolHit>,
}

impl SearchResponse {
    pub fn format(&self) -> String {
        self.symbols
            .iter()
            .map(|hit| format!("{} {} @ {}", hit.kind.name(), hit.name, hit.location))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// --- locate resolution ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateRequest {
    pub locate: Locate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateTarget {
    pub location: Location,
    /// Source text at the resolved position.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateResponse {
    /// `null` when the locate target does not exist in the file.
    pub target: Option<LocateTarget>,
}

impl LocateResponse {
    pub fn format(&self) -> Option<String> {
        self.target.as_ref().map(|t| format!("{}\n  {}", t.location, t.text))
    }
}

// --- rename ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenamePreviewRequest {
    pub locate: Locate,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEdit {
    pub file_path: PathBuf,
    pub replacements: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenamePreviewResponse {
    /// Handle for a later `/capability/rename/execute`.
    pub rename_id: String,
    pub edits: Vec<FileEdit>,
}

impl RenamePreviewResponse {
    pub fn format(&self) -> String {
        let mut lines = vec![format!("Rename ID: {}", self.rename_id)];
        for edit in &self.edits {
            lines.push(format!(
                "  {} ({} replacement{})",
                edit.file_path.display(),
                edit.replacements,
                if edit.replacements == 1 { "" } else { "s" }
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameExecuteRequest {
    pub rename_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameExecuteResponse {
    pub applied: bool,
    pub files_changed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RenameExecuteResponse {
    pub fn format(&self) -> String {
        if self.applied {
            format!("Applied rename across {} file(s)", self.files_changed)
        } else {
            match &self.message {
                Some(message) => format!("Rename failed: {message}"),
                None => "Rename failed".to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
