// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running service instances and the deployments they belong to.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Opaque identifier of a running instance.
    ///
    /// Store indexes compare instance ids case-insensitively.
    pub struct InstanceId;
}

crate::define_id! {
    /// Identifier of a deployment: the group of instances exec sessions
    /// are balanced across.
    pub struct DeploymentId;
}

/// A live instance that can host exec sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub deployment_id: DeploymentId,
}

impl Instance {
    pub fn new(id: impl Into<InstanceId>, deployment_id: impl Into<DeploymentId>) -> Self {
        Self {
            id: id.into(),
            deployment_id: deployment_id.into(),
        }
    }
}
