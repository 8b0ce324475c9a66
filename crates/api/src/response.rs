//! Shared response body for the notification API.
//!
//! Success and error responses alike carry a single `message` field.

use serde::Serialize;

/// Standard `{ "message": ... }` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
