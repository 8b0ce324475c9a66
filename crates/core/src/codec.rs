//! JSON wire encoding for [`Notification`] payloads.
//!
//! The payload is a self-describing JSON object:
//!
//! ```json
//! {"from":{"id":1,"name":"Emma"},"to":{"id":2,"name":"Bruno"},"message":"hi"}
//! ```

use crate::notification::Notification;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode notification: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode notification: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serialize a notification into its wire bytes.
///
/// Serialization goes into a fresh buffer, so on error no partial output
/// ever escapes.
pub fn encode(notification: &Notification) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(notification).map_err(CodecError::Encode)
}

/// Parse wire bytes back into a notification.
pub fn decode(bytes: &[u8]) -> Result<Notification, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
