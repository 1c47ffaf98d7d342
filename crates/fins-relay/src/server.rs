//! HTTP server for relay endpoints
//!
//! Provides /health and the `/api/*` passthrough to the catalog.

use crate::proxy::Forwarder;
use crate::types::{HealthResponse, OriginPolicy, ProxyErrorBody};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

/// Mount point of the passthrough
const RELAY_MOUNT: &str = "/api";

/// Shared state for the HTTP server
pub struct ServerState {
    pub forwarder: Forwarder,
    pub origins: OriginPolicy,
    pub preserve_upstream_status: bool,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(forwarder: Forwarder, origins: OriginPolicy, preserve_upstream_status: bool) -> Self {
        Self {
            forwarder,
            origins,
            preserve_upstream_status,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    let policy = state.origins.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts| {
                origin
                    .to_str()
                    .map(|o| policy.allows(Some(o)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .route(RELAY_MOUNT, any(relay))
        .route("/api/{*rest}", any(relay))
        .layer(cors)
        .layer(middleware::from_fn_with_state(state.clone(), origin_guard))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Reject disallowed browser origins before anything else runs
async fn origin_guard(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let allowed = match request.headers().get(header::ORIGIN) {
        None => true,
        Some(value) => value
            .to_str()
            .map(|o| state.origins.allows(Some(o)))
            .unwrap_or(false),
    };

    if !allowed {
        warn!(
            origin = ?request.headers().get(header::ORIGIN),
            path = %request.uri().path(),
            "Rejected request from disallowed origin"
        );
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Origin not allowed".to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        upstream: state.forwarder.upstream_base_url().to_string(),
    })
}

/// Path and query of the request with the mount point stripped
fn relay_suffix(uri: &Uri) -> String {
    let path = uri.path().strip_prefix(RELAY_MOUNT).unwrap_or(uri.path());
    match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}

/// Forward any request under the mount point to the catalog
async fn relay(State(state): State<SharedState>, method: Method, uri: Uri) -> Response {
    let url = state.forwarder.upstream_url(&relay_suffix(&uri));
    info!(method = %method, url = %url, "Relaying request");

    match state.forwarder.forward(method, &url).await {
        Ok((status, data)) => {
            info!(status, url = %url, "Relay succeeded");
            let status = if state.preserve_upstream_status {
                StatusCode::from_u16(status).unwrap_or(StatusCode::OK)
            } else {
                StatusCode::OK
            };
            (status, Json(data)).into_response()
        }
        Err(e) => {
            error!(url = %url, error = %e, "Relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProxyErrorBody {
                    error: "Proxy error".to_string(),
                    message: e.to_string(),
                    url,
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::Path;
    use axum::http::HeaderMap;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Serve a fake catalog and return its base URL and a request counter
    async fn spawn_upstream() -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = Router::new()
            .route(
                "/semantyfish-api/resources/resources/species/{id}",
                any(
                    move |method: Method, headers: HeaderMap, uri: Uri, Path(id): Path<u64>| {
                        let counter = counter.clone();
                        async move {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if id == 404 {
                                return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"})))
                                    .into_response();
                            }
                            Json(json!({
                                "id": id,
                                "method": method.as_str(),
                                "query": uri.query(),
                                "accept": headers.get("accept").and_then(|v| v.to_str().ok()),
                                "content_type": headers.get("content-type").and_then(|v| v.to_str().ok()),
                                "authorization": headers.get("authorization").is_some(),
                            }))
                            .into_response()
                        }
                    },
                ),
            )
            .route(
                "/semantyfish-api/resources/resources/broken",
                get(|| async { "<html>upstream down</html>" }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{}/semantyfish-api", addr), hits)
    }

    fn create_test_state(upstream: &str, preserve_upstream_status: bool) -> SharedState {
        let forwarder = Forwarder::new(upstream, "resources");
        Arc::new(ServerState::new(
            forwarder,
            OriginPolicy::default(),
            preserve_upstream_status,
        ))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_relay_suffix() {
        let uri: Uri = "/api/resources/species/143?lang=en".parse().unwrap();
        assert_eq!(relay_suffix(&uri), "/resources/species/143?lang=en");

        let uri: Uri = "/api".parse().unwrap();
        assert_eq!(relay_suffix(&uri), "");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let router = create_router(create_test_state("http://127.0.0.1:9/x", false));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["upstream"], "http://127.0.0.1:9/x");
        assert!(json["uptime_secs"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_relay_forwards_path_query_method_and_fixed_headers() {
        let (upstream, hits) = spawn_upstream().await;
        let router = create_router(create_test_state(&upstream, false));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/resources/species/143?lang=en")
                    .header("content-type", "text/plain")
                    .header("authorization", "Bearer secret")
                    .body(Body::from("ignored"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], 143);
        assert_eq!(json["method"], "POST");
        assert_eq!(json["query"], "lang=en");
        assert_eq!(json["accept"], "application/json");
        assert_eq!(json["content_type"], "application/json");
        assert_eq!(json["authorization"], false);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_relay_flattens_upstream_status_by_default() {
        let (upstream, _) = spawn_upstream().await;
        let router = create_router(create_test_state(&upstream, false));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/resources/species/404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["detail"], "Not found");
    }

    #[tokio::test]
    async fn test_relay_can_preserve_upstream_status() {
        let (upstream, _) = spawn_upstream().await;
        let router = create_router(create_test_state(&upstream, true));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/resources/species/404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_relay_non_json_body_is_proxy_error() {
        let (upstream, _) = spawn_upstream().await;
        let router = create_router(create_test_state(&upstream, false));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/resources/broken")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Proxy error");
        assert!(json["message"].as_str().unwrap().contains("invalid JSON"));
        assert_eq!(
            json["url"],
            format!("{}/resources/resources/broken", upstream)
        );
    }

    #[tokio::test]
    async fn test_relay_unreachable_upstream_is_proxy_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let router = create_router(create_test_state(&format!("http://{}", addr), false));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/resources/species/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Proxy error");
        assert!(json["url"]
            .as_str()
            .unwrap()
            .ends_with("/resources/resources/species/1"));
    }

    #[tokio::test]
    async fn test_disallowed_origin_never_reaches_upstream() {
        let (upstream, hits) = spawn_upstream().await;
        let router = create_router(create_test_state(&upstream, false));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/resources/species/143")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "Origin not allowed");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_localhost_origin_gets_credentialed_cors_headers() {
        let (upstream, _) = spawn_upstream().await;
        let router = create_router(create_test_state(&upstream, false));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/resources/species/143")
                    .header("origin", "http://localhost:4321")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:4321"
        );
        assert_eq!(
            headers.get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let router = create_router(create_test_state("http://127.0.0.1:9/x", false));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/resources/species/143")
                    .header("origin", "http://127.0.0.1:5173")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://127.0.0.1:5173"
        );
    }
}
