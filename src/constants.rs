// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Prefix for every bootstrap log line
pub const LOG_PREFIX: &str = "KubernetesNodeProvider: ";

/// The field manager name used for server-side apply
pub const OPERATOR_NAME: &str = "autoscaler-bootstrap";

/// Provider config field names, also used as resource types in log lines and errors
pub mod fields {
    pub const NAMESPACE: &str = "namespace";
    pub const SERVICE_ACCOUNT: &str = "autoscaler_service_account";
    pub const ROLE: &str = "autoscaler_role";
    pub const ROLE_BINDING: &str = "autoscaler_role_binding";
    pub const SERVICES: &str = "services";
    /// Singular form used when logging an individual service
    pub const SERVICE: &str = "service";
}

/// Container resources that are autodetected for each node type
pub mod resources {
    pub const AUTODETECTED: [&str; 2] = ["cpu", "gpu"];
    pub const REQUESTS: &str = "requests";
    pub const LIMITS: &str = "limits";
    /// Suffix marking a milli-unit quantity (e.g. "500m")
    pub const MILLI_SUFFIX: char = 'm';
}
