// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Categorized failure status for errors crossing a component boundary.

use serde::{Deserialize, Serialize};

/// Failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    /// No capacity to satisfy the request right now (e.g. no live instance)
    ResourceExhausted,
    /// The store gave up on a transaction; nothing was written
    Aborted,
    NotFound,
    /// The target exists but is in the wrong state for the request
    FailedPrecondition,
    InvalidArgument,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        match self {
            Code::ResourceExhausted => "resource_exhausted",
            Code::Aborted => "aborted",
            Code::NotFound => "not_found",
            Code::FailedPrecondition => "failed_precondition",
            Code::InvalidArgument => "invalid_argument",
        }
    }

    /// Whether the same request may succeed later without changes
    pub fn is_retryable(self) -> bool {
        matches!(self, Code::ResourceExhausted | Code::Aborted)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
