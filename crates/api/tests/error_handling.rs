//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router or
//! publisher is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use notify_api::error::AppError;
use notify_core::codec;
use notify_core::error::CoreError;
use notify_events::PublishError;
use notify_pipeline::PipelineError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn bad_request_returns_400_with_field_and_cause() {
    let source = "x".parse::<i64>().unwrap_err();
    let err = AppError::BadRequest {
        field: "fromID",
        value: "x".to_string(),
        source,
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "failed to parse fromID from value \"x\": invalid digit found in string"
    );
}

#[tokio::test]
async fn not_found_returns_500_naming_id() {
    let err = AppError::from(PipelineError::NotFound(CoreError::NotFound {
        entity: "Party",
        id: 9,
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Party with id 9 not found");
}

#[tokio::test]
async fn publish_error_returns_500_without_details() {
    let err = AppError::from(PipelineError::Publish(PublishError::Delivery {
        topic: "notifications".into(),
        cause: "secret broker hostname".into(),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Failed to send notification");
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn encode_error_returns_500() {
    let codec_error = codec::decode(b"{").unwrap_err();
    let err = AppError::from(PipelineError::Encode(codec_error));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Failed to send notification");
}
