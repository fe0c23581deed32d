// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(
        "Exposing external IP addresses for ray containers isn't currently supported. \
         Please set 'use_internal_ips' to true."
    )]
    ExternalIpUnsupported,

    #[error(
        "Namespace of {field} config doesn't match provided namespace '{namespace}'. \
         Either set it to {namespace} or remove the field"
    )]
    InvalidNamespace { field: String, namespace: String },

    #[error("Namespace creation failed: {0}")]
    NamespaceError(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
