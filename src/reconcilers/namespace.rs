// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace consistency between nested resources and the working namespace.

use crate::error::{BootstrapError, Result};

/// Back-fill an absent namespace, accept a matching one, reject anything else.
///
/// `field` names the offending resource (or subject) in the error.
pub fn ensure_namespace(declared: &mut Option<String>, namespace: &str, field: &str) -> Result<()> {
    match declared {
        None => {
            *declared = Some(namespace.to_string());
            Ok(())
        }
        Some(ns) if ns == namespace => Ok(()),
        Some(_) => Err(BootstrapError::InvalidNamespace {
            field: field.to_string(),
            namespace: namespace.to_string(),
        }),
    }
}
