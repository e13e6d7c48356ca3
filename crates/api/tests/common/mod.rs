#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::get as axum_get;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use antemortem_api::config::ServerConfig;
use antemortem_api::routes;
use antemortem_api::state::AppState;
use antemortem_api::ws::{self, WsManager};
use antemortem_capture::{CameraManager, SyntheticBackend};
use antemortem_core::detection::StubLesionDetector;
use antemortem_pipeline::DetectionPipeline;
use antemortem_report::ReportService;

/// Build a test `ServerConfig` rooted at the given data directory.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        data_dir: data_dir.to_path_buf(),
    }
}

/// A fresh data directory for one test. Kept on disk for the duration of
/// the process so the router can outlive this call.
pub fn test_data_dir() -> std::path::PathBuf {
    tempfile::tempdir()
        .expect("failed to create temp data dir")
        .keep()
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a throwaway data directory.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_in(pool, &test_data_dir())
}

/// Build the application router rooted at a specific data directory.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_in(pool: SqlitePool, data_dir: &Path) -> Router {
    let config = test_config(data_dir);
    let ws_manager = Arc::new(WsManager::new());
    let camera_manager = Arc::new(CameraManager::new(Box::new(SyntheticBackend)));
    let pipeline = Arc::new(DetectionPipeline::new(
        pool.clone(),
        Arc::new(StubLesionDetector),
    ));
    let reports = Arc::new(ReportService::new(
        config.inspections_dir(),
        config.reports_dir(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        ws_manager,
        camera_manager,
        pipeline,
        reports,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .route("/ws", axum_get(ws::ws_handler))
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }
    let request = builder.body(body).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Body::from(json.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(
        app,
        Method::PUT,
        uri,
        Body::from(json.to_string()),
        Some("application/json"),
    )
    .await
}

/// Send a multipart POST assembled from `(part_name, bytes)` pairs.
pub async fn post_multipart(app: Router, uri: &str, parts: &[(&str, &[u8])]) -> Response {
    const BOUNDARY: &str = "test-boundary-7a3f";
    let mut body = Vec::new();
    for (name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    send(
        app,
        Method::POST,
        uri,
        Body::from(body),
        Some(&format!("multipart/form-data; boundary={BOUNDARY}")),
    )
    .await
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
