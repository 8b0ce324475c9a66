#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use notify_api::config::ServerConfig;
use notify_api::router::build_app_router;
use notify_api::state::AppState;
use notify_core::Directory;
use notify_events::{InMemoryPublisher, NotificationPublisher};
use notify_pipeline::NotificationPipeline;

pub const TEST_TOPIC: &str = "notifications";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|var| match var {
        "HOST" => Some("127.0.0.1".to_string()),
        "PORT" => Some("0".to_string()),
        "KAFKA_TOPIC" => Some(TEST_TOPIC.to_string()),
        _ => None,
    })
    .unwrap()
}

/// Build the full application router around the given publisher and the
/// built-in directory.
pub fn build_test_app(publisher: Arc<dyn NotificationPublisher>) -> Router {
    let config = test_config();
    let pipeline = NotificationPipeline::new(
        Arc::new(Directory::builtin()),
        publisher,
        config.kafka.topic.clone(),
    );
    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline: Arc::new(pipeline),
    };
    build_app_router(state, &config)
}

/// App backed by a fresh recording publisher, returned alongside it.
pub fn recording_app() -> (Router, Arc<InMemoryPublisher>) {
    let publisher = Arc::new(InMemoryPublisher::new());
    (build_test_app(publisher.clone()), publisher)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body with an optional `Content-Type` header.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
