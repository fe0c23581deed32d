// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access: the cluster client seam and namespace resolution.

pub mod client;
pub mod namespaces;

pub use client::{ClusterResourceClient, KubeClusterClient, NamespacedObject};
pub use namespaces::resolve_namespace;
