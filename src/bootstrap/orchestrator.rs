// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sequences namespace resolution and resource reconciliation.

use crate::constants::{fields, LOG_PREFIX};
use crate::error::{BootstrapError, Result};
use crate::kubernetes::{resolve_namespace, ClusterResourceClient};
use crate::reconcilers::{ManagedResource, ReconcileOutcome, ResourceReconciler};
use crate::types::ClusterConfig;
use tracing::{info, instrument};

/// The decision taken for one provider resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOutcome {
    pub resource: &'static str,
    pub name: Option<String>,
    pub outcome: ReconcileOutcome,
}

/// Result of a successful bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// The input config with every nested namespace back-filled
    pub config: ClusterConfig,
    pub namespace: String,
    /// One entry per resource, in reconcile order
    pub outcomes: Vec<ResourceOutcome>,
}

/// Ensure the namespace, service account, role, role binding and services the
/// autoscaler needs exist, in that order.
///
/// Stops at the first failure; anything already created is left in place and is
/// picked up again on the next run.
#[instrument(skip_all)]
pub async fn bootstrap<C: ClusterResourceClient>(
    client: &C,
    mut config: ClusterConfig,
) -> Result<BootstrapReport> {
    let provider = &mut config.provider;
    if !provider.use_internal_ips {
        return Err(BootstrapError::ExternalIpUnsupported);
    }

    let namespace = resolve_namespace(client, provider).await?;
    let reconciler = ResourceReconciler::new(client, &namespace);

    let mut outcomes = vec![
        reconcile_slot(&reconciler, &mut provider.autoscaler_service_account).await?,
        reconcile_slot(&reconciler, &mut provider.autoscaler_role).await?,
        reconcile_slot(&reconciler, &mut provider.autoscaler_role_binding).await?,
    ];

    match provider.services.as_mut() {
        Some(services) => {
            for service in services.iter_mut() {
                let outcome = reconciler.reconcile(Some(&mut *service)).await?;
                outcomes.push(ResourceOutcome {
                    resource: fields::SERVICE,
                    name: service.metadata.name.clone(),
                    outcome,
                });
            }
        }
        None => {
            info!("{}no {} config provided, must already exist", LOG_PREFIX, fields::SERVICES);
            outcomes.push(ResourceOutcome {
                resource: fields::SERVICES,
                name: None,
                outcome: ReconcileOutcome::Skipped,
            });
        }
    }

    Ok(BootstrapReport {
        config,
        namespace,
        outcomes,
    })
}

async fn reconcile_slot<C: ClusterResourceClient, K: ManagedResource>(
    reconciler: &ResourceReconciler<'_, C>,
    slot: &mut Option<K>,
) -> Result<ResourceOutcome> {
    let outcome = reconciler.reconcile(slot.as_mut()).await?;
    Ok(ResourceOutcome {
        resource: K::FIELD,
        name: slot.as_ref().and_then(|r| r.meta().name.clone()),
        outcome,
    })
}
