// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed cluster configuration consumed and returned by the bootstrap.

use crate::constants::fields;
use crate::error::{BootstrapError, Result};
use k8s_openapi::api::core::v1::{Pod, Service, ServiceAccount};
use k8s_openapi::api::rbac::v1::{Role, RoleBinding};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Full autoscaler cluster configuration.
///
/// Only the sections the bootstrap touches are typed; every other key is kept
/// in `extra` so the finalized config round-trips the caller's input.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ClusterConfig {
    pub provider: ProviderConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_node_types: Option<BTreeMap<String, NodeTypeConfig>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub use_internal_ips: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaler_service_account: Option<ServiceAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaler_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaler_role_binding: Option<RoleBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NodeTypeConfig {
    pub node_config: Pod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<BTreeMap<String, u64>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ClusterConfig {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw)
            .map_err(|e| BootstrapError::ConfigError(format!("Failed to parse cluster config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            BootstrapError::ConfigError(format!("Failed to serialize cluster config: {}", e))
        })
    }
}

impl ProviderConfig {
    /// The mandatory working namespace every bootstrapped resource lives in
    pub fn working_namespace(&self) -> Result<&str> {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => Ok(ns),
            _ => Err(BootstrapError::ConfigError(format!(
                "Must specify {} in Kubernetes config.",
                fields::NAMESPACE
            ))),
        }
    }
}
