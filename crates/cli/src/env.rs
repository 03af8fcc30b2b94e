// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Deadline for a child or manager socket to start accepting (default 10s,
/// configurable via `LSPC_SOCKET_WAIT_MS`).
pub fn socket_wait() -> Duration {
    duration_ms("LSPC_SOCKET_WAIT_MS").unwrap_or(Duration::from_secs(10))
}

/// Polling interval while waiting on a socket (default 100ms).
pub fn poll_interval() -> Duration {
    duration_ms("LSPC_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(100))
}

/// Per-request HTTP timeout (default 30s, configurable via
/// `LSPC_HTTP_TIMEOUT_MS`).
pub fn http_timeout() -> Duration {
    duration_ms("LSPC_HTTP_TIMEOUT_MS").unwrap_or(Duration::from_secs(30))
}

/// Transport-level connect retries per request (default 5).
pub fn connect_retries() -> u32 {
    std::env::var("LSPC_CONNECT_RETRIES").ok().and_then(|s| s.parse().ok()).unwrap_or(5)
}

/// Explicit path to the manager binary (used by tests and packaging).
pub fn manager_binary() -> Option<PathBuf> {
    std::env::var("LSPC_MANAGER_BINARY").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
