// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Working namespace resolution

use crate::constants::{fields, LOG_PREFIX};
use crate::error::{BootstrapError, Result};
use crate::kubernetes::ClusterResourceClient;
use crate::types::ProviderConfig;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::ObjectMeta;
use tracing::{info, instrument, warn};

/// Resolve the working namespace from the provider config, creating it if absent.
///
/// A failing existence check is tolerated: the namespace is assumed usable and
/// bootstrap continues. A failing create is fatal.
#[instrument(skip_all)]
pub async fn resolve_namespace<C: ClusterResourceClient>(
    client: &C,
    provider: &ProviderConfig,
) -> Result<String> {
    let namespace = provider.working_namespace()?.to_string();

    let existing = match client.list_namespaces(&namespace).await {
        Ok(existing) => existing,
        Err(e) => {
            warn!(
                "{}not checking if {} '{}' exists: {}",
                LOG_PREFIX,
                fields::NAMESPACE,
                namespace,
                e
            );
            return Ok(namespace);
        }
    };

    match existing.len() {
        0 => {}
        1 => {
            info!("{}using existing {} '{}'", LOG_PREFIX, fields::NAMESPACE, namespace);
            return Ok(namespace);
        }
        n => {
            return Err(BootstrapError::InvariantViolation(format!(
                "found {} namespaces named '{}'",
                n, namespace
            )))
        }
    }

    info!(
        "{}{} '{}' not found, attempting to create it",
        LOG_PREFIX,
        fields::NAMESPACE,
        namespace
    );
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(namespace.clone()),
            ..Default::default()
        },
        ..Default::default()
    };
    client.create_namespace(&ns).await.map_err(|e| {
        BootstrapError::NamespaceError(format!("Failed to create namespace {}: {}", namespace, e))
    })?;
    info!("{}successfully created {} '{}'", LOG_PREFIX, fields::NAMESPACE, namespace);

    Ok(namespace)
}
