// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the Kubernetes API: an HTTP-level mock behind a real
//! `kube::Client`, and an in-memory [`ClusterResourceClient`].

use crate::error::{BootstrapError, Result};
use crate::kubernetes::{ClusterResourceClient, NamespacedObject};
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::core::v1::Namespace;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;
use tracing_subscriber::fmt::MakeWriter;

/// A request as seen by [`MockService`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or_default().to_string();

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(method.clone(), path.clone()))
            .cloned();
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest { method, path, query });

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| {
                (404, status_json(404, "NotFound", "not found"))
            });
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock namespace object
pub fn namespace_json(name: &str) -> Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
}

/// Create a mock service account object
pub fn service_account_json(name: &str, namespace: &str) -> Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ServiceAccount",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        }
    })
}

/// Wrap items in a list response
pub fn list_json(kind: &str, api_version: &str, items: Vec<Value>) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a failure Status response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Operations on [`FakeCluster`] that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOp {
    List,
    Create,
    Update,
}

/// A call received by [`FakeCluster`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNamespaces(String),
    CreateNamespace(String),
    List {
        kind: String,
        namespace: String,
        name: String,
    },
    Create {
        kind: String,
        namespace: String,
        name: String,
    },
    Update {
        kind: String,
        namespace: String,
        name: String,
    },
}

impl Call {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateNamespace(_) | Call::Create { .. } | Call::Update { .. }
        )
    }
}

struct StoredObject {
    kind: String,
    namespace: String,
    name: String,
    value: Value,
}

#[derive(Default)]
struct FakeState {
    namespaces: Vec<Namespace>,
    objects: Vec<StoredObject>,
    calls: Vec<Call>,
    failures: Vec<(FakeOp, String)>,
}

impl FakeState {
    fn check(&self, op: FakeOp, kind: &str) -> Result<()> {
        if self.failures.iter().any(|(o, k)| *o == op && k == kind) {
            return Err(BootstrapError::KubeError(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: format!("injected {:?} failure for {}", op, kind),
                reason: "InternalError".to_string(),
                code: 500,
            })));
        }
        Ok(())
    }
}

/// In-memory cluster that records every call made against it.
///
/// Duplicate identities are allowed when seeding so invariant checks can be exercised.
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<FakeState>,
}

fn kind_of<K: NamespacedObject>() -> String {
    K::kind(&()).to_string()
}

fn name_of<K: NamespacedObject>(resource: &K) -> String {
    resource.meta().name.clone().unwrap_or_default()
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(self, name: &str) -> Self {
        self.state.lock().unwrap().namespaces.push(Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        self
    }

    pub fn with_object<K: NamespacedObject>(self, namespace: &str, resource: &K) -> Self {
        self.state.lock().unwrap().objects.push(StoredObject {
            kind: kind_of::<K>(),
            namespace: namespace.to_string(),
            name: name_of(resource),
            value: serde_json::to_value(resource).unwrap(),
        });
        self
    }

    /// Make every `op` against `kind` fail; use "Namespace" for namespace calls
    pub fn failing(self, op: FakeOp, kind: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((op, kind.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    pub fn has_namespace(&self, name: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .namespaces
            .iter()
            .any(|n| n.metadata.name.as_deref() == Some(name))
    }

    pub fn get<K: NamespacedObject>(&self, namespace: &str, name: &str) -> Option<K> {
        let kind = kind_of::<K>();
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .find(|o| o.kind == kind && o.namespace == namespace && o.name == name)
            .map(|o| serde_json::from_value(o.value.clone()).unwrap())
    }
}

#[async_trait]
impl ClusterResourceClient for FakeCluster {
    async fn list_namespaces(&self, name: &str) -> Result<Vec<Namespace>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListNamespaces(name.to_string()));
        state.check(FakeOp::List, "Namespace")?;

        Ok(state
            .namespaces
            .iter()
            .filter(|n| n.metadata.name.as_deref() == Some(name))
            .cloned()
            .collect())
    }

    async fn create_namespace(&self, namespace: &Namespace) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let name = namespace.metadata.name.clone().unwrap_or_default();
        state.calls.push(Call::CreateNamespace(name));
        state.check(FakeOp::Create, "Namespace")?;

        state.namespaces.push(namespace.clone());
        Ok(())
    }

    async fn list<K: NamespacedObject>(&self, namespace: &str, name: &str) -> Result<Vec<K>> {
        let kind = kind_of::<K>();
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List {
            kind: kind.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        state.check(FakeOp::List, &kind)?;

        Ok(state
            .objects
            .iter()
            .filter(|o| o.kind == kind && o.namespace == namespace && o.name == name)
            .map(|o| serde_json::from_value(o.value.clone()).unwrap())
            .collect())
    }

    async fn create<K: NamespacedObject>(&self, namespace: &str, resource: &K) -> Result<K> {
        let kind = kind_of::<K>();
        let name = name_of(resource);
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create {
            kind: kind.clone(),
            namespace: namespace.to_string(),
            name: name.clone(),
        });
        state.check(FakeOp::Create, &kind)?;

        state.objects.push(StoredObject {
            kind,
            namespace: namespace.to_string(),
            name,
            value: serde_json::to_value(resource).unwrap(),
        });
        Ok(resource.clone())
    }

    async fn update<K: NamespacedObject>(
        &self,
        namespace: &str,
        name: &str,
        resource: &K,
    ) -> Result<()> {
        let kind = kind_of::<K>();
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update {
            kind: kind.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        state.check(FakeOp::Update, &kind)?;

        let value = serde_json::to_value(resource).unwrap();
        for object in state
            .objects
            .iter_mut()
            .filter(|o| o.kind == kind && o.namespace == namespace && o.name == name)
        {
            object.value = value.clone();
        }
        Ok(())
    }
}

/// Captures formatted tracing output for assertions on log lines
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route this thread's tracing output into the capture until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
