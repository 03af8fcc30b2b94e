// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::time::Duration;

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Idle window before a managed child is torn down (default 10 minutes,
/// configurable via `LSPC_IDLE_TIMEOUT_MS`).
pub fn idle_timeout() -> Duration {
    duration_ms("LSPC_IDLE_TIMEOUT_MS").unwrap_or(Duration::from_secs(600))
}

/// Grace period between SIGTERM and SIGKILL on graceful stop (default 5s,
/// configurable via `LSPC_DRAIN_TIMEOUT_MS`).
pub fn drain_timeout() -> Duration {
    duration_ms("LSPC_DRAIN_TIMEOUT_MS").unwrap_or(Duration::from_secs(5))
}

/// Polling interval for socket liveness checks (default 100ms).
pub fn poll_interval() -> Duration {
    duration_ms("LSPC_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(100))
}
