// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.
//!
//! Off unless enabled: the default filter only lets warnings through, and
//! the host never sees log output as part of a result.

use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_FILTER, LogConfig};

/// Environment variable overriding the configured filter.
pub const LOG_ENV: &str = "REXCALL_LOG";

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(config: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Filter from [`LOG_ENV`] if set, else from `config`; an unparsable
/// directive falls back to the default.
pub fn filter(config: &LogConfig) -> EnvFilter {
    let directive = directive(&config.filter, std::env::var(LOG_ENV).ok());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn directive(configured: &str, from_env: Option<String>) -> String {
    from_env
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
