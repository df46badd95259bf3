// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol messages exchanged with an instance's entrypoint

use crate::id::ExecId;
use serde::{Deserialize, Serialize};

/// Output stream an entrypoint chunk was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputChannel {
    Stdout,
    Stderr,
}

/// Events an entrypoint publishes into an exec session's event sink.
///
/// Serializes with `{"type": "exec:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntrypointExecRequest {
    /// The entrypoint started the requested command
    #[serde(rename = "exec:opened")]
    Opened { exec_id: ExecId },

    #[serde(rename = "exec:output")]
    Output {
        channel: OutputChannel,
        data: Vec<u8>,
    },

    #[serde(rename = "exec:exited")]
    Exited { code: i32 },

    /// The entrypoint could not run or keep running the command
    #[serde(rename = "exec:error")]
    Error { message: String },
}

impl EntrypointExecRequest {
    /// Whether no further events follow this one for the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exited { .. } | Self::Error { .. })
    }
}

/// One exec session an entrypoint should open, as delivered in its config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecConfig {
    pub id: ExecId,
    pub args: Vec<String>,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
