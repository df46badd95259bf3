// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! In-memory transactional storage for instances and exec sessions

mod error;
mod exec;
mod index;
mod instance;
mod store;

pub use error::{ExecError, StoreError};
pub use exec::ExecRegistry;
pub use instance::RemovedInstance;
pub use store::{ReadTxn, Store, Tables, WriteTxn};
