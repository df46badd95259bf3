// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exec session service.
//!
//! Ties the instance directory and the exec registry to the two sides of an
//! exec session: the client that starts it and holds the event receiver, and
//! the instance entrypoint that attaches to it and publishes events.

use crate::entrypoint::{ConfigWatcher, EntrypointConfig};
use crate::{Config, ServiceError};
use flo_core::{
    DeploymentId, EntrypointExecRequest, ExecId, ExecSession, ExecTemplate, InputSource,
    InputStream, Instance, InstanceId,
};
use flo_storage::{ExecRegistry, RemovedInstance, Store};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Client side of a newly started exec session
#[derive(Debug)]
pub struct ExecStart {
    pub id: ExecId,
    pub instance_id: InstanceId,
    /// Events published by the instance's entrypoint
    pub events: mpsc::Receiver<EntrypointExecRequest>,
}

/// Entrypoint side of an attached exec session
pub struct ExecAttachment {
    pub session: Arc<ExecSession>,
    /// The client's input, if it supplied one
    pub input: Option<InputStream>,
}

impl std::fmt::Debug for ExecAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecAttachment")
            .field("session", &self.session)
            .field("input", &self.input.is_some())
            .finish()
    }
}

/// In-process exec service
pub struct Server {
    config: Config,
    store: Arc<Store>,
    execs: ExecRegistry,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(Store::new());
        Self {
            config,
            execs: ExecRegistry::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn register_instance(&self, instance: Instance) {
        self.store.instance_create(instance);
    }

    /// Deregister an instance. Its exec sessions stay until finished.
    pub fn deregister_instance(&self, instance_id: &str) -> Option<RemovedInstance> {
        let removed = self.store.instance_delete(instance_id)?;
        if removed.orphaned_execs > 0 {
            warn!(
                instance_id,
                orphaned = removed.orphaned_execs,
                "instance left with exec sessions"
            );
        }
        Some(removed)
    }

    /// Start an exec session on some instance of a deployment.
    pub fn start_exec(
        &self,
        deployment_id: &DeploymentId,
        args: Vec<String>,
        input: InputSource,
    ) -> Result<ExecStart, ServiceError> {
        if args.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "exec requires at least one argument".to_string(),
            ));
        }
        let (tx, rx) = mpsc::channel(self.config.event_buffer);
        let session = self
            .execs
            .create_for_deployment(deployment_id, ExecTemplate::new(args, input, tx))?;
        Ok(ExecStart {
            id: session.id,
            instance_id: session.instance_id.clone(),
            events: rx,
        })
    }

    /// Attach an entrypoint to a session. Only the first attach succeeds.
    pub fn attach_exec(&self, id: ExecId) -> Result<ExecAttachment, ServiceError> {
        let session = self.execs.get(id).ok_or(ServiceError::NotFound(id))?;
        if !session.connect() {
            warn!(exec_id = %id, "exec session already connected");
            return Err(ServiceError::AlreadyConnected(id));
        }
        let input = session.input.take();
        info!(exec_id = %id, instance_id = %session.instance_id, "exec session attached");
        Ok(ExecAttachment { session, input })
    }

    /// Deliver an entrypoint event to the session's consumer.
    ///
    /// Waits for channel capacity; no store lock is held while waiting.
    pub async fn publish(
        &self,
        id: ExecId,
        event: EntrypointExecRequest,
    ) -> Result<(), ServiceError> {
        let sink = self
            .execs
            .get(id)
            .map(|session| session.events.clone())
            .ok_or(ServiceError::NotFound(id))?;
        let terminal = event.is_terminal();
        sink.send(event)
            .await
            .map_err(|_| ServiceError::ConsumerGone(id))?;
        if terminal {
            debug!(exec_id = %id, "terminal event delivered");
        }
        Ok(())
    }

    /// Remove a session. Finishing an unknown or finished session is a no-op.
    pub fn finish_exec(&self, id: ExecId) -> Result<(), ServiceError> {
        Ok(self.execs.delete(id)?)
    }

    /// Sessions bound to an instance, for routing its events.
    pub fn sessions_for_instance(
        &self,
        instance_id: &str,
    ) -> Result<Vec<Arc<ExecSession>>, ServiceError> {
        Ok(self.execs.list_by_instance(instance_id)?)
    }

    pub fn entrypoint_config(
        &self,
        instance_id: &InstanceId,
    ) -> Result<EntrypointConfig, ServiceError> {
        Ok(EntrypointConfig::from_tables(&self.store.read(), instance_id)?)
    }

    pub fn watch_entrypoint_config(&self, instance_id: InstanceId) -> ConfigWatcher {
        ConfigWatcher::new(Arc::clone(&self.store), instance_id)
    }

    pub fn exec_count(&self) -> usize {
        self.execs.len()
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
