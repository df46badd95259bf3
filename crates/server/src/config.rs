// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`FLO_CONFIG`, else `<config dir>/flo/config.toml` when it exists), then
//! `FLO_*` environment overrides.

use crate::env;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_EVENT_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Capacity of each exec session's event channel
    pub event_buffer: usize,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log file; stderr when unset
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_buffer: DEFAULT_EVENT_BUFFER,
            log_level: "info".to_string(),
            log_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => match env::default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(raw) = env::event_buffer() {
            self.event_buffer = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("FLO_EVENT_BUFFER={raw:?}")))?;
        }
        if let Some(level) = env::log_level() {
            self.log_level = level;
        }
        if let Some(path) = env::log_path() {
            self.log_path = Some(path);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_buffer == 0 {
            return Err(ConfigError::Invalid(
                "event_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
