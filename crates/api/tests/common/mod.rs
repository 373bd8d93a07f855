#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pasos_api::config::ServerConfig;
use pasos_api::router::build_app_router;
use pasos_api::state::AppState;
use pasos_core::assets::{AssetConfig, AssetResolver};
use pasos_instagram::InstagramConfig;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const VERIFY_TOKEN: &str = "verify-me";
pub const APP_SECRET: &str = "test-app-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(static_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: static_dir.to_path_buf(),
        debug: false,
        admin_api_token: Some(ADMIN_TOKEN.to_string()),
    }
}

/// Asset config pointing at files that do not exist (fallback mode).
pub fn test_asset_config() -> AssetConfig {
    AssetConfig {
        manifest_path: PathBuf::from("/nonexistent/manifest.json"),
        static_url: "/static/".to_string(),
        dev_server_url: "http://localhost:5173".to_string(),
        critical_css_path: PathBuf::from("/nonexistent/critical.css"),
        debug: false,
    }
}

/// Webhook secrets set, no Graph API access token.
pub fn test_instagram_config() -> InstagramConfig {
    InstagramConfig {
        verify_token: Some(VERIFY_TOKEN.to_string()),
        app_secret: Some(APP_SECRET.to_string()),
        graph_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    }
}

/// Build the full application router with all middleware layers, exactly as
/// `main.rs` does, without SMTP.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(Path::new("/nonexistent/static")), test_instagram_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig, instagram: InstagramConfig) -> Router {
    let assets = AssetResolver::with_manifest(test_asset_config(), None);
    let state = AppState::new(pool, config.clone(), assets, None, instagram);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Admin request with the test bearer token; `body` is sent as JSON.
pub async fn admin(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"));
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send(app, builder.body(body).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn testimonial_json(name: &str, rating: i64) -> serde_json::Value {
    serde_json::json!({
        "student_name": name,
        "rating": rating,
        "class_type": "salsa",
        "content": "The beginner salsa course changed my weekends.",
    })
}

/// Submit a testimonial and return its id.
pub async fn create_testimonial(pool: &PgPool, name: &str, rating: i64) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/testimonials/submit/", testimonial_json(name, rating)).await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
