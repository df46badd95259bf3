// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exec session registry.
//!
//! Sessions are indexed uniquely by id and non-uniquely by the instance they
//! are bound to (case-insensitive). New sessions are placed on the least
//! loaded instance of the requested deployment.
//!
//! The registry never checks that a session's instance is still live after
//! placement. A session whose instance was deregistered stays listed under
//! that instance id until someone deletes it.

use crate::index::MultiIndex;
use crate::store::{Store, Tables};
use crate::{ExecError, StoreError};
use flo_core::{DeploymentId, ExecId, ExecIdGen, ExecSession, ExecTemplate, InstanceId};
use imbl::OrdMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const ID_INDEX: &str = "execs.id";
const INSTANCE_INDEX: &str = "execs.instance_id";

#[derive(Debug, Clone, Default)]
pub(crate) struct ExecTable {
    by_id: OrdMap<ExecId, Arc<ExecSession>>,
    by_instance: MultiIndex<ExecId>,
}

impl Tables {
    pub fn exec(&self, id: ExecId) -> Option<&Arc<ExecSession>> {
        self.execs.by_id.get(&id)
    }

    /// Sessions bound to an instance, in id order.
    pub fn execs_by_instance(
        &self,
        instance_id: &str,
    ) -> Result<Vec<Arc<ExecSession>>, StoreError> {
        self.execs
            .by_instance
            .get(instance_id)
            .map(|id| {
                self.execs
                    .by_id
                    .get(id)
                    .cloned()
                    .ok_or_else(|| StoreError::DanglingIndex {
                        index: INSTANCE_INDEX,
                        key: id.to_string(),
                    })
            })
            .collect()
    }

    pub fn exec_count(&self) -> usize {
        self.execs.by_id.len()
    }

    /// Number of sessions bound to an instance
    pub fn exec_load(&self, instance_id: &str) -> usize {
        self.execs.by_instance.count(instance_id)
    }

    pub(crate) fn insert_exec(&mut self, session: Arc<ExecSession>) -> Result<(), StoreError> {
        if self.execs.by_id.contains_key(&session.id) {
            return Err(StoreError::DuplicateKey {
                index: ID_INDEX,
                key: session.id.to_string(),
            });
        }
        self.execs
            .by_instance
            .insert(session.instance_id.as_str(), session.id);
        self.execs.by_id.insert(session.id, session);
        Ok(())
    }

    /// Remove every record with this id from all indexes.
    pub(crate) fn delete_exec(&mut self, id: ExecId) -> Option<Arc<ExecSession>> {
        let removed = self.execs.by_id.remove(&id)?;
        self.execs
            .by_instance
            .remove(removed.instance_id.as_str(), &id);
        Some(removed)
    }

    /// Pick the instance of `deployment_id` with the fewest sessions.
    ///
    /// The first instance with no sessions is taken without looking further.
    /// Otherwise the scan covers every instance and ties go to the earliest.
    fn least_loaded_instance(
        &self,
        deployment_id: &str,
    ) -> Result<Option<InstanceId>, StoreError> {
        let mut min: Option<(InstanceId, usize)> = None;
        for instance in self.instances_by_deployment(deployment_id)? {
            let load = self.exec_load(instance.id.as_str());
            debug!(instance_id = %instance.id, load, "placement candidate");
            if load == 0 {
                return Ok(Some(instance.id.clone()));
            }
            if min.as_ref().map_or(true, |(_, min_load)| load < *min_load) {
                min = Some((instance.id.clone(), load));
            }
        }
        Ok(min.map(|(id, _)| id))
    }
}

/// Exec session registry over a shared [`Store`].
///
/// Owns the id counter, so ids are unique per registry.
pub struct ExecRegistry {
    store: Arc<Store>,
    ids: ExecIdGen,
}

impl ExecRegistry {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            ids: ExecIdGen::new(),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Create a session on the least loaded instance of a deployment.
    ///
    /// Fails with `ResourceExhausted` when the deployment has no instances.
    /// An id is consumed once an instance has been chosen, even if the
    /// insert then fails.
    pub fn create_for_deployment(
        &self,
        deployment_id: &DeploymentId,
        template: ExecTemplate,
    ) -> Result<Arc<ExecSession>, ExecError> {
        let mut txn = self.store.write();

        let Some(instance_id) = txn.least_loaded_instance(deployment_id.as_str())? else {
            warn!(deployment_id = %deployment_id, "no instances available for exec");
            return Err(ExecError::ResourceExhausted(deployment_id.clone()));
        };

        let id = self.ids.next();
        let session = Arc::new(ExecSession::bind(template, id, instance_id));
        txn.insert_exec(Arc::clone(&session))?;
        txn.commit();

        info!(
            exec_id = %session.id,
            instance_id = %session.instance_id,
            deployment_id = %deployment_id,
            "exec session created"
        );
        Ok(session)
    }

    /// Delete a session. Deleting an unknown id succeeds and changes nothing.
    pub fn delete(&self, id: ExecId) -> Result<(), ExecError> {
        let mut txn = self.store.write();
        match txn.delete_exec(id) {
            Some(session) => {
                txn.commit();
                info!(exec_id = %id, instance_id = %session.instance_id, "exec session deleted");
            }
            None => debug!(exec_id = %id, "exec session already gone"),
        }
        Ok(())
    }

    pub fn get(&self, id: ExecId) -> Option<Arc<ExecSession>> {
        self.store.read().exec(id).cloned()
    }

    /// Sessions currently bound to an instance, from one snapshot.
    pub fn list_by_instance(
        &self,
        instance_id: &str,
    ) -> Result<Vec<Arc<ExecSession>>, ExecError> {
        Ok(self.store.read().execs_by_instance(instance_id)?)
    }

    pub fn len(&self) -> usize {
        self.store.read().exec_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
