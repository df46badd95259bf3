// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use flo_core::{Code, ExecId, Status};
use flo_storage::{ExecError, StoreError};
use thiserror::Error;

/// Errors returned by [`crate::Server`] operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("exec session {0} not found")]
    NotFound(ExecId),

    #[error("exec session {0} already connected")]
    AlreadyConnected(ExecId),

    /// The consumer of the session's events went away
    #[error("exec session {0} has no event consumer")]
    ConsumerGone(ExecId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ServiceError {
    pub fn code(&self) -> Code {
        match self {
            ServiceError::Exec(e) => e.code(),
            ServiceError::Store(_) => Code::Aborted,
            ServiceError::NotFound(_) => Code::NotFound,
            ServiceError::AlreadyConnected(_) | ServiceError::ConsumerGone(_) => {
                Code::FailedPrecondition
            }
            ServiceError::InvalidArgument(_) => Code::InvalidArgument,
        }
    }

    pub fn to_status(&self) -> Status {
        Status::new(self.code(), self.to_string())
    }
}

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        err.to_status()
    }
}
