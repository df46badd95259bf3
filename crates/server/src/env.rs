// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the server crate.

use std::path::PathBuf;

/// Explicit config file path
pub fn config_path() -> Option<PathBuf> {
    std::env::var("FLO_CONFIG").ok().map(PathBuf::from)
}

/// Default config file: `<config dir>/flo/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flo").join("config.toml"))
}

/// Event buffer override (raw, validated by the caller)
pub fn event_buffer() -> Option<String> {
    std::env::var("FLO_EVENT_BUFFER").ok()
}

pub fn log_level() -> Option<String> {
    std::env::var("FLO_LOG_LEVEL").ok().filter(|s| !s.is_empty())
}

pub fn log_path() -> Option<PathBuf> {
    std::env::var("FLO_LOG_PATH")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
