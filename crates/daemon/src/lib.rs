// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LSP Manager Daemon (lspcd)
//!
//! Background process that owns the registry of managed language-server
//! children and brokers them to short-lived CLI invocations.
//!
//! Architecture:
//! - HTTP control plane: axum router served over the manager's Unix socket
//! - Supervisors: one spawned task per child, owning its full lifecycle

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod http;
pub mod lifecycle;
pub mod registry;
pub mod supervisor;

pub use lifecycle::{Config, LifecycleError};
pub use registry::ManagerCtx;
pub use supervisor::{ChildState, Supervisor};
