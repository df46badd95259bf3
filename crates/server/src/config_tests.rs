// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &["FLO_CONFIG", "FLO_EVENT_BUFFER", "FLO_LOG_LEVEL", "FLO_LOG_PATH"];

/// Clears `FLO_*` vars on creation and again on drop.
struct EnvGuard;

impl EnvGuard {
    fn new() -> Self {
        for var in VARS {
            std::env::remove_var(var);
        }
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.event_buffer, 32);
    assert_eq!(config.log_level, "info");
    assert!(config.log_path.is_none());
}

#[test]
fn file_overrides_defaults() {
    let file = write_config("event_buffer = 4\nlog_path = \"/tmp/flo.log\"\n");
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.event_buffer, 4);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_path, Some(PathBuf::from("/tmp/flo.log")));
}

#[yare::parameterized(
    unknown_key = { "buffer = 4\n" },
    wrong_type  = { "event_buffer = \"many\"\n" },
)]
fn file_parse_errors(contents: &str) {
    let file = write_config(contents);
    assert!(matches!(
        Config::from_file(file.path()),
        Err(ConfigError::Parse(..))
    ));
}

#[test]
fn file_zero_buffer_is_invalid() {
    let file = write_config("event_buffer = 0\n");
    assert!(matches!(
        Config::from_file(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read(..)));
}

#[test]
#[serial]
fn load_reads_file_then_env() {
    let _env = EnvGuard::new();
    let file = write_config("event_buffer = 4\nlog_level = \"debug\"\n");
    std::env::set_var("FLO_CONFIG", file.path());
    std::env::set_var("FLO_EVENT_BUFFER", "16");

    let config = Config::load().unwrap();
    assert_eq!(config.event_buffer, 16);
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn load_env_log_settings() {
    let _env = EnvGuard::new();
    let dir = tempfile::tempdir().unwrap();
    let file = write_config("");
    std::env::set_var("FLO_CONFIG", file.path());
    std::env::set_var("FLO_LOG_LEVEL", "flo_storage=trace");
    std::env::set_var("FLO_LOG_PATH", dir.path().join("flo.log"));

    let config = Config::load().unwrap();
    assert_eq!(config.log_level, "flo_storage=trace");
    assert_eq!(config.log_path, Some(dir.path().join("flo.log")));
}

#[test]
#[serial]
fn load_rejects_bad_event_buffer() {
    let _env = EnvGuard::new();
    let file = write_config("");
    std::env::set_var("FLO_CONFIG", file.path());

    for raw in ["0", "-1", "lots"] {
        std::env::set_var("FLO_EVENT_BUFFER", raw);
        assert!(
            matches!(Config::load(), Err(ConfigError::Invalid(_))),
            "accepted FLO_EVENT_BUFFER={raw}"
        );
    }
}
