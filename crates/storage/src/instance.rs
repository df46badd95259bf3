// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instance directory: live instances indexed by id and by deployment.

use crate::index::MultiIndex;
use crate::store::{Store, Tables};
use crate::StoreError;
use flo_core::Instance;
use imbl::HashMap;
use tracing::info;

const DEPLOYMENT_INDEX: &str = "instances.deployment_id";

/// Deployment index entry. Sorts in registration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Registration {
    seq: u64,
    /// Case-folded instance id
    key: String,
}

#[derive(Debug, Clone)]
struct Registered {
    seq: u64,
    instance: Instance,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct InstanceTable {
    /// Keyed by case-folded instance id
    by_id: HashMap<String, Registered>,
    by_deployment: MultiIndex<Registration>,
    next_seq: u64,
}

/// An instance removed from the directory
#[derive(Debug, Clone)]
pub struct RemovedInstance {
    pub instance: Instance,
    /// Exec sessions still bound to it when it was removed
    pub orphaned_execs: usize,
}

impl Tables {
    pub fn instance(&self, id: &str) -> Option<&Instance> {
        self.instances
            .by_id
            .get(&id.to_lowercase())
            .map(|r| &r.instance)
    }

    /// Instances of a deployment in registration order.
    pub fn instances_by_deployment(
        &self,
        deployment_id: &str,
    ) -> Result<Vec<&Instance>, StoreError> {
        self.instances
            .by_deployment
            .get(deployment_id)
            .map(|reg| {
                self.instances
                    .by_id
                    .get(&reg.key)
                    .map(|r| &r.instance)
                    .ok_or_else(|| StoreError::DanglingIndex {
                        index: DEPLOYMENT_INDEX,
                        key: reg.key.clone(),
                    })
            })
            .collect()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.by_id.len()
    }

    /// Insert or replace an instance. A replaced instance moves to the end
    /// of its (possibly new) deployment's registration order.
    pub(crate) fn upsert_instance(&mut self, instance: Instance) {
        let key = instance.id.index_key();
        self.remove_instance(&key);

        let seq = self.instances.next_seq;
        self.instances.next_seq += 1;
        self.instances.by_deployment.insert(
            instance.deployment_id.as_str(),
            Registration {
                seq,
                key: key.clone(),
            },
        );
        self.instances
            .by_id
            .insert(key, Registered { seq, instance });
    }

    /// Remove an instance. Exec sessions bound to it are left in place.
    pub(crate) fn remove_instance(&mut self, id: &str) -> Option<Instance> {
        let key = id.to_lowercase();
        let removed = self.instances.by_id.remove(&key)?;
        self.instances.by_deployment.remove(
            removed.instance.deployment_id.as_str(),
            &Registration {
                seq: removed.seq,
                key,
            },
        );
        Some(removed.instance)
    }
}

impl Store {
    /// Register a live instance.
    pub fn instance_create(&self, instance: Instance) {
        let id = instance.id.clone();
        let deployment_id = instance.deployment_id.clone();
        let mut txn = self.write();
        txn.upsert_instance(instance);
        txn.commit();
        info!(instance_id = %id, deployment_id = %deployment_id, "instance registered");
    }

    /// Deregister an instance. Missing ids are ignored.
    ///
    /// The orphan count is taken in the same transaction as the removal.
    pub fn instance_delete(&self, id: &str) -> Option<RemovedInstance> {
        let mut txn = self.write();
        let instance = txn.remove_instance(id)?;
        let orphaned_execs = txn.exec_load(id);
        txn.commit();
        info!(instance_id = id, orphaned_execs, "instance deregistered");
        Some(RemovedInstance {
            instance,
            orphaned_execs,
        })
    }

    pub fn instance_get(&self, id: &str) -> Option<Instance> {
        self.read().instance(id).cloned()
    }

    pub fn instances_by_deployment(
        &self,
        deployment_id: &str,
    ) -> Result<Vec<Instance>, StoreError> {
        let txn = self.read();
        let instances = txn.instances_by_deployment(deployment_id)?;
        Ok(instances.into_iter().cloned().collect())
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
