// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::types::provider::ClusterConfig;

/// Process configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the YAML cluster configuration to bootstrap
    pub cluster_config_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let cluster_config_path = env::var("AUTOSCALER_CONFIG")
            .context("AUTOSCALER_CONFIG environment variable not set")?;

        Ok(Config {
            cluster_config_path: PathBuf::from(cluster_config_path),
        })
    }

    /// Read and parse the cluster configuration this process was pointed at
    pub fn load_cluster_config(&self) -> Result<ClusterConfig> {
        let raw = std::fs::read_to_string(&self.cluster_config_path).with_context(|| {
            format!(
                "Failed to read cluster config {}",
                self.cluster_config_path.display()
            )
        })?;

        ClusterConfig::from_yaml(&raw).with_context(|| {
            format!(
                "Failed to parse cluster config {}",
                self.cluster_config_path.display()
            )
        })
    }
}
