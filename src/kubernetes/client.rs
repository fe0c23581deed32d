// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Narrow query/create/update interface to the cluster control plane.
//!
//! The bootstrap only ever talks to the cluster through [`ClusterResourceClient`],
//! so tests can substitute an in-memory double for the real API server.

use crate::constants::OPERATOR_NAME;
use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{ListParams, Patch, PatchParams, PostParams},
    Api, Client, Resource,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Any namespaced, statically typed Kubernetes object the client can move over the wire.
pub trait NamespacedObject:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

impl<K> NamespacedObject for K where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

#[async_trait]
pub trait ClusterResourceClient: Send + Sync {
    /// List namespaces whose name matches exactly
    async fn list_namespaces(&self, name: &str) -> Result<Vec<Namespace>>;

    async fn create_namespace(&self, namespace: &Namespace) -> Result<()>;

    /// List objects of kind `K` in `namespace` whose name matches exactly
    async fn list<K: NamespacedObject>(&self, namespace: &str, name: &str) -> Result<Vec<K>>;

    async fn create<K: NamespacedObject>(&self, namespace: &str, resource: &K) -> Result<K>;

    /// Overwrite the named object with the desired state
    async fn update<K: NamespacedObject>(
        &self,
        namespace: &str,
        name: &str,
        resource: &K,
    ) -> Result<()>;
}

/// [`ClusterResourceClient`] backed by a live `kube::Client`
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Server-side exact-name filter used for every existence check
fn name_selector(name: &str) -> ListParams {
    ListParams::default().fields(&format!("metadata.name={}", name))
}

#[async_trait]
impl ClusterResourceClient for KubeClusterClient {
    #[instrument(skip(self))]
    async fn list_namespaces(&self, name: &str) -> Result<Vec<Namespace>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        Ok(namespaces.list(&name_selector(name)).await?.items)
    }

    #[instrument(skip(self, namespace))]
    async fn create_namespace(&self, namespace: &Namespace) -> Result<()> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        namespaces.create(&PostParams::default(), namespace).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list<K: NamespacedObject>(&self, namespace: &str, name: &str) -> Result<Vec<K>> {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let found = api.list(&name_selector(name)).await?.items;
        debug!("Found {} {} named {}", found.len(), K::kind(&()), name);
        Ok(found)
    }

    #[instrument(skip(self, resource))]
    async fn create<K: NamespacedObject>(&self, namespace: &str, resource: &K) -> Result<K> {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.create(&PostParams::default(), resource).await?)
    }

    #[instrument(skip(self, resource))]
    async fn update<K: NamespacedObject>(
        &self,
        namespace: &str,
        name: &str,
        resource: &K,
    ) -> Result<()> {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let pp = PatchParams::apply(OPERATOR_NAME).force();
        api.patch(name, &pp, &Patch::Apply(resource)).await?;
        Ok(())
    }
}
