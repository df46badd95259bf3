// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-instance entrypoint configuration.
//!
//! An instance's entrypoint learns which exec sessions to open from its
//! config. The watcher re-derives the config after every store commit and
//! yields it only when it changed.

use crate::ServiceError;
use flo_core::{ExecConfig, InstanceId};
use flo_storage::{Store, StoreError, Tables};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// What an instance's entrypoint should be running
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrypointConfig {
    pub instance_id: InstanceId,
    /// Sessions bound to the instance, ordered by id
    pub exec: Vec<ExecConfig>,
}

impl EntrypointConfig {
    pub(crate) fn from_tables(
        tables: &Tables,
        instance_id: &InstanceId,
    ) -> Result<Self, StoreError> {
        let mut exec: Vec<ExecConfig> = tables
            .execs_by_instance(instance_id.as_str())?
            .iter()
            .map(|session| session.config())
            .collect();
        exec.sort_by_key(|config| config.id);
        Ok(Self {
            instance_id: instance_id.clone(),
            exec,
        })
    }
}

/// Streams [`EntrypointConfig`] changes for one instance
pub struct ConfigWatcher {
    store: Arc<Store>,
    instance_id: InstanceId,
    changes: watch::Receiver<u64>,
    last: Option<EntrypointConfig>,
}

impl ConfigWatcher {
    pub(crate) fn new(store: Arc<Store>, instance_id: InstanceId) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            instance_id,
            changes,
            last: None,
        }
    }

    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    /// Next config that differs from the previous one returned.
    ///
    /// The first call resolves immediately with the current config.
    pub async fn next(&mut self) -> Result<EntrypointConfig, ServiceError> {
        loop {
            // Mark the generation seen before reading so a commit racing the
            // read wakes the next wait.
            let _ = self.changes.borrow_and_update();
            let config = EntrypointConfig::from_tables(&self.store.read(), &self.instance_id)?;
            if self.last.as_ref() != Some(&config) {
                self.last = Some(config.clone());
                return Ok(config);
            }
            if self.changes.changed().await.is_err() {
                // Unreachable while `self.store` keeps the sender alive
                return Ok(config);
            }
        }
    }
}

#[cfg(test)]
#[path = "entrypoint_tests.rs"]
mod tests;
