// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store and registry errors

use flo_core::{Code, DeploymentId, Status};
use thiserror::Error;

/// Index maintenance failures inside a transaction.
///
/// The transaction that hit one of these is never committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate key {key} in unique index {index}")]
    DuplicateKey { index: &'static str, key: String },
    #[error("index {index} references missing record {key}")]
    DanglingIndex { index: &'static str, key: String },
}

/// Errors from exec registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("no available instances for exec in deployment {0}")]
    ResourceExhausted(DeploymentId),
    #[error("exec transaction aborted: {0}")]
    Aborted(#[from] StoreError),
}

impl ExecError {
    pub fn code(&self) -> Code {
        match self {
            ExecError::ResourceExhausted(_) => Code::ResourceExhausted,
            ExecError::Aborted(_) => Code::Aborted,
        }
    }

    pub fn to_status(&self) -> Status {
        Status::new(self.code(), self.to_string())
    }
}
