//! Notification publish pipeline.
//!
//! [`NotificationPipeline::send`] runs one request through, in order:
//!
//! 1. resolve sender and recipient against the [`Directory`],
//! 2. assemble the [`Notification`],
//! 3. encode it with [`codec::encode`],
//! 4. publish it keyed by [`routing_key`] and wait for the broker ack.
//!
//! The first failing step ends the request. Parsing of the raw request
//! happens at the HTTP boundary before the pipeline is entered.

use std::sync::Arc;

use notify_core::codec::{self, CodecError};
use notify_core::error::CoreError;
use notify_core::resolver;
use notify_core::types::PartyId;
use notify_core::{Directory, Notification};
use notify_events::{routing_key, NotificationPublisher, PublishError, PublishReceipt};

/// A parsed send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendNotification {
    pub from_id: PartyId,
    pub to_id: PartyId,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    NotFound(CoreError),

    #[error(transparent)]
    Encode(#[from] CodecError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Drives resolve → encode → publish for each request.
///
/// Cheap to share: the directory and publisher are behind `Arc`s and the
/// pipeline itself holds no per-request state.
pub struct NotificationPipeline {
    directory: Arc<Directory>,
    publisher: Arc<dyn NotificationPublisher>,
    topic: String,
}

impl NotificationPipeline {
    pub fn new(
        directory: Arc<Directory>,
        publisher: Arc<dyn NotificationPublisher>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            publisher,
            topic: topic.into(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Publish one notification and return the broker's receipt.
    ///
    /// The publish is the only suspension point; nothing is published when
    /// resolution or encoding fails.
    #[tracing::instrument(skip(self, request), fields(from_id = request.from_id, to_id = request.to_id))]
    pub async fn send(&self, request: SendNotification) -> Result<PublishReceipt, PipelineError> {
        let (from, to) = resolver::resolve(&self.directory, request.from_id, request.to_id)
            .map_err(PipelineError::NotFound)?;

        let notification = Notification::new(from.clone(), to.clone(), request.message);
        let payload = codec::encode(&notification)?;
        let key = routing_key(&notification.to);

        let receipt = self.publisher.publish(&self.topic, &key, &payload).await?;

        tracing::debug!(
            key = %key,
            partition = receipt.partition,
            offset = receipt.offset,
            "Notification published"
        );
        Ok(receipt)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
