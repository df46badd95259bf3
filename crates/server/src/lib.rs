// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Flo exec service
//!
//! Embeds the exec registry in a process: configuration, logging, and the
//! start/attach/publish/finish lifecycle of exec sessions.

pub mod config;
pub mod entrypoint;
mod env;
mod error;
pub mod logging;
mod server;

pub use config::{Config, ConfigError};
pub use entrypoint::{ConfigWatcher, EntrypointConfig};
pub use error::ServiceError;
pub use server::{ExecAttachment, ExecStart, Server};
