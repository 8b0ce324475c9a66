//! Notification publishing to the message broker.
//!
//! - [`NotificationPublisher`] — the publish capability used by the pipeline.
//! - [`KafkaPublisher`] — rdkafka-backed publisher with synchronous
//!   delivery acknowledgment.
//! - [`InMemoryPublisher`] — records publishes in memory for tests.
//! - [`routing_key`] — partition key derivation from the recipient.

pub mod kafka;
pub mod memory;
pub mod publisher;

pub use kafka::{KafkaConfig, KafkaPublisher};
pub use memory::{InMemoryPublisher, PublishedRecord};
pub use publisher::{routing_key, NotificationPublisher, PublishError, PublishReceipt};
