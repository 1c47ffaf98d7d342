//! In-process fake catalog for tests
//!
//! Serves canned JSON under `/api/resources/...` on `127.0.0.1:0` and
//! records every request path, so tests can assert which calls were made
//! and in what order. Anything not registered answers 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use semantyfish_api::CatalogClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub(crate) struct FakeCatalog {
    resources: HashMap<String, Value>,
    searches: HashMap<(String, String), Value>,
}

struct Inner {
    resources: HashMap<String, Value>,
    searches: HashMap<(String, String), Value>,
    log: Mutex<Vec<String>>,
}

pub(crate) struct RunningCatalog {
    base_url: String,
    inner: Arc<Inner>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn species(self, id: u64, body: Value) -> Self {
        self.resource(&format!("species/{}", id), body)
    }

    pub(crate) fn resource(mut self, path: &str, body: Value) -> Self {
        self.resources.insert(path.to_string(), body);
        self
    }

    /// Answer `search_species?{field}={value}` with `{"results": ids}`
    pub(crate) fn search(mut self, field: &str, value: &str, ids: Value) -> Self {
        self.searches
            .insert((field.to_string(), value.to_string()), ids);
        self
    }

    pub(crate) async fn spawn(self) -> RunningCatalog {
        let inner = Arc::new(Inner {
            resources: self.resources,
            searches: self.searches,
            log: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/resources/{*path}", get(serve_resource))
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        RunningCatalog {
            base_url: format!("http://{}/api", addr),
            inner,
        }
    }
}

async fn serve_resource(
    State(inner): State<Arc<Inner>>,
    Path(path): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if path == "search_species" {
        let Some((field, value)) = params.into_iter().next() else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        inner
            .log
            .lock()
            .unwrap()
            .push(format!("search_species:{}={}", field, value));

        let results = inner
            .searches
            .get(&(field, value))
            .cloned()
            .unwrap_or_else(|| json!([]));
        return Json(json!({ "results": results })).into_response();
    }

    inner.log.lock().unwrap().push(path.clone());
    match inner.resources.get(&path) {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

impl RunningCatalog {
    pub(crate) fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.base_url)
    }

    /// Every request received, in arrival order
    pub(crate) fn requests(&self) -> Vec<String> {
        self.inner.log.lock().unwrap().clone()
    }

    pub(crate) fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }

    pub(crate) fn hits_prefix(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|p| p.starts_with(prefix))
            .count()
    }
}
