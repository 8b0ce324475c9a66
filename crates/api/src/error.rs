use std::num::ParseIntError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notify_pipeline::PipelineError;

use crate::response::MessageResponse;

/// Message returned for failures whose details stay in the logs.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send notification";

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as a `{"message": ...}` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A form field could not be parsed as an integer id.
    #[error("failed to parse {field} from value {value:?}: {source}")]
    BadRequest {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A failure inside the resolve/encode/publish pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { .. } => (StatusCode::BAD_REQUEST, self.to_string()),

            // Unknown parties are reported as a server error to stay
            // compatible with existing clients.
            AppError::Pipeline(PipelineError::NotFound(err)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }

            AppError::Pipeline(err @ PipelineError::Encode(_)) => {
                tracing::error!(error = %err, "Notification encoding failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SEND_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Pipeline(err @ PipelineError::Publish(_)) => {
                tracing::error!(error = %err, "Notification publish failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SEND_FAILED_MESSAGE.to_string(),
                )
            }
        };

        (status, axum::Json(MessageResponse::new(message))).into_response()
    }
}
