// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic existence -> create/update/skip reconciliation for bootstrapped resources.

use crate::constants::{fields, LOG_PREFIX};
use crate::error::{BootstrapError, Result};
use crate::kubernetes::{ClusterResourceClient, NamespacedObject};
use crate::reconcilers::namespace::ensure_namespace;
use k8s_openapi::api::core::v1::{Service, ServiceAccount};
use k8s_openapi::api::rbac::v1::{Role, RoleBinding};
use serde_json::Value;
use tracing::{info, instrument};

/// What a single reconcile decided to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Not present in the provider config, assumed to be managed elsewhere
    Skipped,
    UsedExisting,
    Created,
    Updated,
}

/// Per-kind capabilities the reconciler needs beyond plain API access.
pub trait ManagedResource: NamespacedObject {
    /// Resource type as named in log lines and namespace errors
    const FIELD: &'static str;

    /// Validate namespaces nested below `metadata`
    fn ensure_nested_namespaces(&mut self, _namespace: &str) -> Result<()> {
        Ok(())
    }

    /// Whether an existing object has to be updated to match `self`.
    /// Presence alone is sufficient unless a kind says otherwise.
    fn needs_update(&self, _existing: &Self) -> bool {
        false
    }
}

impl ManagedResource for ServiceAccount {
    const FIELD: &'static str = fields::SERVICE_ACCOUNT;
}

impl ManagedResource for Role {
    const FIELD: &'static str = fields::ROLE;
}

impl ManagedResource for RoleBinding {
    const FIELD: &'static str = fields::ROLE_BINDING;

    fn ensure_nested_namespaces(&mut self, namespace: &str) -> Result<()> {
        for subject in self.subjects.iter_mut().flatten() {
            let field = format!("{} subject '{}'", Self::FIELD, subject.name);
            ensure_namespace(&mut subject.namespace, namespace, &field)?;
        }
        Ok(())
    }
}

impl ManagedResource for Service {
    const FIELD: &'static str = fields::SERVICE;

    /// Only fields set in the desired spec are compared; the API server fills
    /// in defaults (`clusterIP`, `type`, port `protocol`, ...) that the config omits.
    fn needs_update(&self, existing: &Self) -> bool {
        match (
            serde_json::to_value(&self.spec),
            serde_json::to_value(&existing.spec),
        ) {
            (Ok(desired), Ok(existing)) => !is_subset(&desired, &existing),
            _ => true,
        }
    }
}

/// Whether every value set in `desired` is present and equal in `existing`.
/// Arrays must match element-wise with equal length.
fn is_subset(desired: &Value, existing: &Value) -> bool {
    match (desired, existing) {
        (Value::Null, _) => true,
        (Value::Object(desired), Value::Object(existing)) => desired.iter().all(|(key, value)| {
            value.is_null() || existing.get(key).is_some_and(|e| is_subset(value, e))
        }),
        (Value::Array(desired), Value::Array(existing)) => {
            desired.len() == existing.len()
                && desired.iter().zip(existing).all(|(d, e)| is_subset(d, e))
        }
        (desired, existing) => desired == existing,
    }
}

/// Reconciles desired resources against a single working namespace
pub struct ResourceReconciler<'a, C> {
    client: &'a C,
    namespace: &'a str,
}

impl<'a, C: ClusterResourceClient> ResourceReconciler<'a, C> {
    pub fn new(client: &'a C, namespace: &'a str) -> Self {
        Self { client, namespace }
    }

    /// Converge the cluster towards `desired`, back-filling its namespaces in place.
    ///
    /// `None` means the provider config omits this resource; nothing is queried.
    #[instrument(skip_all, fields(resource = K::FIELD))]
    pub async fn reconcile<K: ManagedResource>(
        &self,
        desired: Option<&mut K>,
    ) -> Result<ReconcileOutcome> {
        let Some(desired) = desired else {
            info!("{}no {} config provided, must already exist", LOG_PREFIX, K::FIELD);
            return Ok(ReconcileOutcome::Skipped);
        };

        let name = resource_name(desired)?;
        ensure_namespace(
            &mut desired.meta_mut().namespace,
            self.namespace,
            &format!("{} '{}'", K::FIELD, name),
        )?;
        desired.ensure_nested_namespaces(self.namespace)?;

        let mut existing: Vec<K> = self.client.list(self.namespace, &name).await?;
        match existing.len() {
            0 => {
                info!("{}{} '{}' not found, attempting to create it", LOG_PREFIX, K::FIELD, name);
                self.client.create(self.namespace, &*desired).await?;
                info!("{}successfully created {} '{}'", LOG_PREFIX, K::FIELD, name);
                Ok(ReconcileOutcome::Created)
            }
            1 => {
                let existing = existing.remove(0);
                if desired.needs_update(&existing) {
                    info!("{}updating existing {} '{}'", LOG_PREFIX, K::FIELD, name);
                    self.client.update(self.namespace, &name, &*desired).await?;
                    Ok(ReconcileOutcome::Updated)
                } else {
                    info!("{}using existing {} '{}'", LOG_PREFIX, K::FIELD, name);
                    Ok(ReconcileOutcome::UsedExisting)
                }
            }
            n => Err(BootstrapError::InvariantViolation(format!(
                "found {} {} resources named '{}' in namespace '{}'",
                n,
                K::FIELD,
                name,
                self.namespace
            ))),
        }
    }
}

fn resource_name<K: ManagedResource>(resource: &K) -> Result<String> {
    resource
        .meta()
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            BootstrapError::ConfigError(format!("{} config is missing metadata.name", K::FIELD))
        })
}
