// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier types and exec id allocation

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;

/// Define a newtype ID wrapper around `String`.
///
/// Generates `new()`, `as_str()`, `index_key()`, `Display`, `From<String>`, `From<&str>`,
/// `PartialEq<str>`, `PartialEq<&str>`, and `Borrow<str>` implementations.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct MyId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Case-folded form used as a key in store indexes.
            pub fn index_key(&self) -> String {
                self.0.to_lowercase()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Identifier of an exec session.
///
/// Assigned by [`ExecIdGen`]; positive and never reused by the generator
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecId(i64);

impl ExecId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ExecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExecId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Error parsing an [`ExecId`] from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid exec id: {0:?}")]
pub struct ParseExecIdError(pub String);

impl FromStr for ExecId {
    type Err = ParseExecIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseExecIdError(s.to_string()))
    }
}

/// Monotonic exec id allocator.
///
/// Each registry owns its own generator, so two registries in one process
/// hand out overlapping ranges without colliding inside either of them.
#[derive(Debug, Default)]
pub struct ExecIdGen {
    last: AtomicI64,
}

impl ExecIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id. The first id is 1.
    pub fn next(&self) -> ExecId {
        ExecId(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Most recently allocated id, or 0 if none have been allocated.
    pub fn last(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
