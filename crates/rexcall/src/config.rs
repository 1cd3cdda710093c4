// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `rexcall.toml` configuration.
//!
//! ```toml
//! [limits]
//! objects = 256
//! backtrack = 1000000
//!
//! [log]
//! filter = "warn"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::fancy::DEFAULT_BACKTRACK_LIMIT;
use crate::registry::DEFAULT_OBJECT_LIMIT;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "REXCALL_CONFIG";

/// Filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{}: {key} must be greater than zero", path.display())]
    Invalid { path: PathBuf, key: &'static str },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub limits: LimitsConfig,
    pub log: LogConfig,
}

/// Resource limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum number of live compiled patterns.
    pub objects: usize,

    /// Backtracking steps allowed per match when a pattern sets no limit.
    pub backtrack: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            objects: DEFAULT_OBJECT_LIMIT,
            backtrack: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

/// Diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `"rexcall=debug"`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration text; `path` is used in error messages only.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Load the file named by [`CONFIG_ENV`], or defaults when it is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    fn validate(self, path: &Path) -> Result<Self, ConfigError> {
        let invalid = |key| ConfigError::Invalid {
            path: path.to_path_buf(),
            key,
        };
        if self.limits.objects == 0 {
            return Err(invalid("limits.objects"));
        }
        if self.limits.backtrack == 0 {
            return Err(invalid("limits.backtrack"));
        }
        Ok(self)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
