// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One-shot bootstrap of the autoscaler's control-plane resources.

pub mod orchestrator;
pub mod resources;

pub use orchestrator::{bootstrap, BootstrapReport, ResourceOutcome};
pub use resources::{autodetect_resources, fill_out_resources};
