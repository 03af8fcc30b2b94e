// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core types shared by the LSP CLI and the manager daemon: the language
//! registry, client targets and ids, locate strings, and the runtime
//! directory layout.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod language;
mod locate;
mod paths;
mod target;

pub use language::{LanguageKind, ServerInvocation};
pub use locate::{LineScope, Locate, LocateError};
pub use paths::{RuntimePaths, RuntimePathsError, MANAGER_STARTUP_ERROR, MANAGER_STARTUP_MARKER};
pub use target::{find_target, match_target, ClientId, ClientTarget};

/// Format a remaining-time value in seconds for display, e.g. `598.2s`.
pub fn format_remaining(secs: f64) -> String {
    format!("{:.1}s", secs.max(0.0))
}
