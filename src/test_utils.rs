// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the Kubernetes API, Vault and the workflow collaborators.

use crate::config::{Config, Operation};
use crate::error::{Result, UpdaterError};
use crate::kubernetes::KubeconfigSource;
use crate::retry::RetryPolicy;
use crate::vault::SecretStore;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    failures: Arc<Mutex<HashSet<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Fail GET requests for the path at the transport level
    pub fn fail_get(self, path: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }

    fn should_fail(&self, method: &str, path: &str) -> bool {
        self.failures
            .lock()
            .unwrap()
            .contains(&(method.to_string(), path.to_string()))
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

        let fail = self.should_fail(&method, &path);
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            if fail {
                let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
                return Err(Box::new(err) as tower::BoxError);
            }
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json(&path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 Status response body
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a mock Secret JSON response; `entry` is a (key, base64 value) pair
pub fn secret_json(name: &str, namespace: &str, entry: Option<(&str, &str)>) -> String {
    let mut secret = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "type": "cluster.x-k8s.io/secret"
    });
    if let Some((key, value)) = entry {
        secret["data"] = serde_json::json!({ key: value });
    }
    secret.to_string()
}

/// Create a mock Cluster API Cluster JSON response
pub fn cluster_json(name: &str, namespace: &str, phase: Option<&str>) -> String {
    let mut cluster = serde_json::json!({
        "apiVersion": "cluster.x-k8s.io/v1beta1",
        "kind": "Cluster",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "spec": {}
    });
    if let Some(phase) = phase {
        cluster["status"] = serde_json::json!({ "phase": phase });
    }
    cluster.to_string()
}

/// One HTTP request seen by [`VaultStub`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub token: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct StubState {
    responses: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Local Vault HTTP server replaying canned responses in request order.
/// Requests past the end of the script get a 500.
pub struct VaultStub {
    port: u16,
    state: Arc<StubState>,
}

impl VaultStub {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let state = Arc::new(StubState {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        });
        let app = Router::new().fallback(stub_handler).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self { port, state }
    }

    pub fn addr(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn stub_handler(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        token: headers
            .get("x-vault-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((500, r#"{"errors":["no scripted response"]}"#.to_string()));
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// In-memory secret store counting writes
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Kubeconfig source replaying scripted extraction results
pub struct ScriptedSource {
    phase: Mutex<Option<Result<Option<String>>>>,
    extractions: Mutex<VecDeque<Result<String>>>,
    phase_calls: AtomicUsize,
    extract_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(phase: Result<Option<String>>, extractions: Vec<Result<String>>) -> Self {
        Self {
            phase: Mutex::new(Some(phase)),
            extractions: Mutex::new(extractions.into()),
            phase_calls: AtomicUsize::new(0),
            extract_calls: AtomicUsize::new(0),
        }
    }

    /// A provisioned cluster that always yields `kubeconfig`
    pub fn ready(kubeconfig: &str) -> Self {
        Self::new(
            Ok(Some("Provisioned".to_string())),
            vec![Ok(kubeconfig.to_string())],
        )
    }

    pub fn phase_calls(&self) -> usize {
        self.phase_calls.load(Ordering::SeqCst)
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KubeconfigSource for ScriptedSource {
    async fn cluster_phase(&self, _cluster_name: &str, _namespace: &str) -> Result<Option<String>> {
        self.phase_calls.fetch_add(1, Ordering::SeqCst);
        self.phase
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(None))
    }

    async fn extract(&self, cluster_name: &str, _namespace: &str) -> Result<String> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        self.extractions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(UpdaterError::ClusterNotReady {
                    cluster: cluster_name.to_string(),
                    reason: "no scripted extraction left".to_string(),
                })
            })
    }
}

/// Configuration for workflow tests, retrying without delay
pub fn test_config(cluster_name: &str, operation: Operation) -> Config {
    Config {
        cluster_name: cluster_name.to_string(),
        namespace: "clusters".to_string(),
        vault_path: "kv/cluster-secret-store/secrets".to_string(),
        vault_addr: "http://127.0.0.1:8200".to_string(),
        vault_key: "KUBECONFIG".to_string(),
        vault_token: "s.test".to_string(),
        management_context: "admin@mgmt".to_string(),
        kubeconfig: None,
        skip_readiness_check: false,
        dry_run: false,
        operation,
        retry: RetryPolicy {
            attempts: 3,
            delay: Duration::ZERO,
        },
    }
}
