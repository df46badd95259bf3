// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transactional in-memory store.
//!
//! Readers take an `Arc` snapshot of every table and never wait on writers
//! beyond the pointer clone. Writers serialize on a single writer lock, edit
//! a private copy of the tables, and publish it in one pointer swap on
//! commit. A write transaction dropped without `commit` leaves nothing
//! behind.
//!
//! Tables are persistent collections, so the private copy shares everything
//! with the published version until the writer touches it.

use crate::exec::ExecTable;
use crate::instance::InstanceTable;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::watch;

/// Every table in one consistency domain
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub(crate) instances: InstanceTable,
    pub(crate) execs: ExecTable,
}

/// Shared store holding the instance directory and the exec registry
pub struct Store {
    current: RwLock<Arc<Tables>>,
    writer: Mutex<()>,
    generation: watch::Sender<u64>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            current: RwLock::new(Arc::new(Tables::default())),
            writer: Mutex::new(()),
            generation,
        }
    }

    /// Open a read-only transaction over the latest committed tables.
    pub fn read(&self) -> ReadTxn {
        ReadTxn {
            tables: Arc::clone(&self.current.read()),
        }
    }

    /// Open a write transaction, waiting for any other writer to finish.
    pub fn write(&self) -> WriteTxn<'_> {
        let guard = self.writer.lock();
        let tables = Tables::clone(&self.current.read());
        WriteTxn {
            store: self,
            _writer: guard,
            tables,
            committed: false,
        }
    }

    /// Number of commits so far
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Receiver that observes each commit's generation number.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

/// Consistent snapshot of the store
pub struct ReadTxn {
    tables: Arc<Tables>,
}

impl Deref for ReadTxn {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        &self.tables
    }
}

/// Exclusive write transaction
pub struct WriteTxn<'a> {
    store: &'a Store,
    _writer: MutexGuard<'a, ()>,
    tables: Tables,
    committed: bool,
}

impl WriteTxn<'_> {
    /// Publish the transaction's tables. Returns the new generation.
    pub fn commit(mut self) -> u64 {
        let tables = std::mem::take(&mut self.tables);
        *self.store.current.write() = Arc::new(tables);
        self.committed = true;
        let mut generation = 0;
        self.store.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });
        generation
    }
}

impl Drop for WriteTxn<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::trace!("write transaction rolled back");
        }
    }
}

impl Deref for WriteTxn<'_> {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        &self.tables
    }
}

impl DerefMut for WriteTxn<'_> {
    fn deref_mut(&mut self) -> &mut Tables {
        &mut self.tables
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
