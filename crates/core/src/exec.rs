// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exec session records.
//!
//! An exec session is a single interactive command bound to one running
//! instance. The record holds two capabilities it never uses itself: the
//! caller's input stream and the send side of the session's event channel.
//! Whoever attaches to the session takes the input; whoever drives the
//! entrypoint publishes into the sink. Neither is closed or drained here.

use crate::event::{EntrypointExecRequest, ExecConfig};
use crate::id::ExecId;
use crate::instance::InstanceId;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;

/// Send side of an exec session's event channel
pub type EventSink = mpsc::Sender<EntrypointExecRequest>;

/// Byte stream feeding an exec session's standard input
pub type InputStream = Box<dyn AsyncRead + Send + Unpin>;

/// Shared handle to a session's input stream.
///
/// Clones refer to the same stream. The stream can be taken exactly once;
/// later calls to [`InputSource::take`] return `None`.
#[derive(Clone, Default)]
pub struct InputSource {
    stream: Arc<Mutex<Option<InputStream>>>,
}

impl InputSource {
    pub fn new(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            stream: Arc::new(Mutex::new(Some(Box::new(reader)))),
        }
    }

    /// A source with no input behind it
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<InputStream> {
        self.stream.lock().take()
    }

    pub fn is_available(&self) -> bool {
        self.stream.lock().is_some()
    }
}

impl std::fmt::Debug for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSource")
            .field("available", &self.is_available())
            .finish()
    }
}

/// What a caller supplies to create an exec session.
///
/// Id and instance are chosen by the registry at placement time, so a
/// template has no place to preset them.
#[derive(Debug, Clone)]
pub struct ExecTemplate {
    pub args: Vec<String>,
    pub input: InputSource,
    pub events: EventSink,
}

impl ExecTemplate {
    pub fn new(args: Vec<String>, input: InputSource, events: EventSink) -> Self {
        Self {
            args,
            input,
            events,
        }
    }
}

/// An exec session bound to an instance
pub struct ExecSession {
    pub id: ExecId,
    pub instance_id: InstanceId,
    pub args: Vec<String>,
    pub input: InputSource,
    pub events: EventSink,
    // Flipped outside store transactions; a record that was already deleted
    // can still be connected by a holder of the Arc.
    connected: AtomicBool,
}

impl ExecSession {
    /// Bind a template to its assigned id and instance.
    pub fn bind(template: ExecTemplate, id: ExecId, instance_id: InstanceId) -> Self {
        Self {
            id,
            instance_id,
            args: template.args,
            input: template.input,
            events: template.events,
            connected: AtomicBool::new(false),
        }
    }

    /// Mark the session connected.
    ///
    /// Returns `true` only for the call that performed the transition; every
    /// later attempt sees it already set and returns `false`.
    pub fn connect(&self) -> bool {
        self.connected
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// The entry an instance's entrypoint receives for this session
    pub fn config(&self) -> ExecConfig {
        ExecConfig {
            id: self.id,
            args: self.args.clone(),
        }
    }
}

impl std::fmt::Debug for ExecSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecSession")
            .field("id", &self.id)
            .field("instance_id", &self.instance_id)
            .field("args", &self.args)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
