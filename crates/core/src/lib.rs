// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flo-core: shared types for the Flo exec registry

pub mod event;
pub mod exec;
pub mod id;
pub mod instance;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use event::{EntrypointExecRequest, ExecConfig, OutputChannel};
pub use exec::{EventSink, ExecSession, ExecTemplate, InputSource, InputStream};
pub use id::{ExecId, ExecIdGen, ParseExecIdError};
pub use instance::{DeploymentId, Instance, InstanceId};
pub use status::{Code, Status};
