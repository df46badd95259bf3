// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{EntrypointExecRequest, ExecTemplate, InputSource, Instance};
use tokio::sync::mpsc;

/// Template with the given args, empty input, and a small event channel.
///
/// The receiver is returned so the channel stays open for the test.
pub fn exec_template(args: &[&str]) -> (ExecTemplate, mpsc::Receiver<EntrypointExecRequest>) {
    let (tx, rx) = mpsc::channel(8);
    let args = args.iter().map(|s| s.to_string()).collect();
    (ExecTemplate::new(args, InputSource::empty(), tx), rx)
}

pub fn instance(id: &str, deployment_id: &str) -> Instance {
    Instance::new(id, deployment_id)
}
