// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CPU/GPU autodetection from node type container specs

use crate::constants::resources::{AUTODETECTED, LIMITS, MILLI_SUFFIX, REQUESTS};
use crate::error::{BootstrapError, Result};
use crate::types::ClusterConfig;
use k8s_openapi::api::core::v1::{Container, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;
use tracing::debug;

/// Merge autodetected CPU/GPU counts into every node type's `resources`.
///
/// Detection reads the first container of each node type's pod spec. Keys the
/// caller already set for other resources are left alone.
pub fn fill_out_resources(config: &mut ClusterConfig) -> Result<()> {
    let Some(node_types) = config.available_node_types.as_mut() else {
        return Ok(());
    };

    for (node_type, node_config) in node_types.iter_mut() {
        let detected = match node_config
            .node_config
            .spec
            .as_ref()
            .and_then(|spec| spec.containers.first())
        {
            Some(container) => autodetect_resources(container)?,
            None => no_resources(),
        };

        debug!(
            "Updating the resources of node type {} to include {:?}.",
            node_type, detected
        );
        node_config
            .resources
            .get_or_insert_with(BTreeMap::new)
            .extend(detected);
    }

    Ok(())
}

/// Detect CPU/GPU counts for a container, keyed "CPU" and "GPU"
pub fn autodetect_resources(container: &Container) -> Result<BTreeMap<String, u64>> {
    let Some(resources) = container.resources.as_ref() else {
        return Ok(no_resources());
    };

    AUTODETECTED
        .iter()
        .map(|name| Ok((name.to_uppercase(), detect_resource(resources, name)?)))
        .collect()
}

fn no_resources() -> BTreeMap<String, u64> {
    AUTODETECTED
        .iter()
        .map(|name| (name.to_uppercase(), 0))
        .collect()
}

/// The smaller of request and limit; an absent side counts as unbounded
fn detect_resource(resources: &ResourceRequirements, name: &str) -> Result<u64> {
    let request = lookup(resources.requests.as_ref(), name, REQUESTS)?;
    let limit = lookup(resources.limits.as_ref(), name, LIMITS)?;

    Ok(request.into_iter().chain(limit).min().unwrap_or(0))
}

fn lookup(
    quantities: Option<&BTreeMap<String, Quantity>>,
    name: &str,
    section: &str,
) -> Result<Option<u64>> {
    quantities
        .and_then(|q| q.get(name))
        .map(|q| {
            parse_quantity(&q.0).map_err(|_| {
                BootstrapError::ConfigError(format!(
                    "unsupported resource quantity '{}' for {}.{}",
                    q.0, section, name
                ))
            })
        })
        .transpose()
}

/// Parse a whole-unit or milli-unit quantity, rounding milli-units up
pub fn parse_quantity(raw: &str) -> Result<u64> {
    let invalid = || BootstrapError::ConfigError(format!("unsupported resource quantity '{}'", raw));

    match raw.strip_suffix(MILLI_SUFFIX) {
        Some(milli) => {
            let milli: u64 = milli.parse().map_err(|_| invalid())?;
            Ok(milli.div_ceil(1000))
        }
        None => raw.parse().map_err(|_| invalid()),
    }
}
