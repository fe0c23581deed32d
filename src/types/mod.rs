// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Configuration types for the autoscaler cluster.

pub mod provider;

pub use provider::{ClusterConfig, NodeTypeConfig, ProviderConfig};
