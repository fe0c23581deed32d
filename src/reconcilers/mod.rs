// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation of the resources the autoscaler needs before it can run.

pub mod namespace;
pub mod resource;

pub use namespace::ensure_namespace;
pub use resource::{ManagedResource, ReconcileOutcome, ResourceReconciler};
