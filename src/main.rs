// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use tracing::info;

use autoscaler_bootstrap::bootstrap::{bootstrap, fill_out_resources};
use autoscaler_bootstrap::config::Config;
use autoscaler_bootstrap::kubernetes::KubeClusterClient;
use autoscaler_bootstrap::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr; stdout carries the finalized config
    logging::init();

    info!("Starting autoscaler bootstrap");

    // Load configuration
    let config = Config::from_env()?;
    let cluster_config = config.load_cluster_config()?;
    info!(
        "Configuration loaded from {}",
        config.cluster_config_path.display()
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let report = bootstrap(&KubeClusterClient::new(client), cluster_config)
        .await
        .context("Failed to bootstrap autoscaler resources")?;
    for outcome in &report.outcomes {
        info!(
            "{} {}: {:?}",
            outcome.resource,
            outcome.name.as_deref().unwrap_or("-"),
            outcome.outcome
        );
    }

    let mut finalized = report.config;
    fill_out_resources(&mut finalized).context("Failed to autodetect node type resources")?;

    // The finalized config is the process output
    print!("{}", finalized.to_yaml()?);
    Ok(())
}
