//! Kafka-backed [`NotificationPublisher`].
//!
//! The producer is created once at startup and shared by every request.
//! `FutureProducer` is safe to use from many tasks at once, so sends are not
//! serialized here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use tracing::{error, info};

use crate::publisher::{NotificationPublisher, PublishError, PublishReceipt};

// ---------------------------------------------------------------------------
// KafkaConfig
// ---------------------------------------------------------------------------

/// Broker connection settings.
#[derive(Debug, Clone)]
pub struct KafkaConfig {
    /// Comma-separated bootstrap servers, e.g. `localhost:9092`.
    pub brokers: String,
    /// Destination topic for notifications.
    pub topic: String,
    /// Client id reported to the broker.
    pub client_id: String,
    /// Upper bound for a single delivery, including librdkafka's own retries.
    pub message_timeout_ms: u64,
    /// How long to wait for broker metadata when connecting.
    pub connect_timeout: Duration,
}

impl KafkaConfig {
    /// Build the rdkafka client configuration for the producer.
    ///
    /// - `acks=all`: the leader waits for all in-sync replicas.
    /// - `enable.idempotence=true`: broker-side retries never duplicate.
    /// - `message.timeout.ms`: delivery reports always arrive within this bound.
    pub fn client_config(&self) -> ClientConfig {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &self.brokers)
            .set("client.id", &self.client_id)
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .set("message.timeout.ms", self.message_timeout_ms.to_string());
        client_config
    }
}

// ---------------------------------------------------------------------------
// KafkaPublisher
// ---------------------------------------------------------------------------

pub struct KafkaPublisher {
    producer: FutureProducer,
    closed: AtomicBool,
}

impl std::fmt::Debug for KafkaPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaPublisher")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl KafkaPublisher {
    /// Create the producer and verify the broker is reachable.
    ///
    /// Fetches metadata for the configured topic so that an unreachable
    /// broker fails startup instead of the first request.
    pub async fn connect(config: &KafkaConfig) -> Result<Self, PublishError> {
        info!(brokers = %config.brokers, topic = %config.topic, "Connecting Kafka producer");

        let producer: FutureProducer = config
            .client_config()
            .create()
            .map_err(|e| PublishError::Connect(e.to_string()))?;

        let client = producer.clone();
        let topic = config.topic.clone();
        let timeout = config.connect_timeout;
        tokio::task::spawn_blocking(move || {
            client
                .client()
                .fetch_metadata(Some(topic.as_str()), Timeout::After(timeout))
                .map(|_| ())
        })
        .await
        .map_err(|e| PublishError::Connect(format!("metadata check panicked: {e}")))?
        .map_err(|e| PublishError::Connect(e.to_string()))?;

        info!(topic = %config.topic, "Kafka producer connected");

        Ok(Self {
            producer,
            closed: AtomicBool::new(false),
        })
    }

    /// Flush outstanding records and stop accepting new publishes.
    ///
    /// Every successful `publish` was already acknowledged, so the flush only
    /// drains records still in flight for requests that have not returned.
    pub async fn close(&self, timeout: Duration) -> Result<(), PublishError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!(?timeout, "Flushing Kafka producer");
        let producer = self.producer.clone();
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .map_err(|e| PublishError::Flush(format!("flush task panicked: {e}")))?
            .map_err(|e| PublishError::Flush(e.to_string()))?;

        info!("Kafka producer closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationPublisher for KafkaPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<PublishReceipt, PublishError> {
        if self.is_closed() {
            return Err(PublishError::Closed);
        }

        let record = FutureRecord::to(topic).key(key).payload(payload);
        let start = Instant::now();

        // The future resolves on the delivery report, i.e. after the broker
        // acknowledged (or rejected) the record.
        match self.producer.send(record, Timeout::Never).await {
            Ok((partition, offset)) => {
                info!(
                    topic,
                    key,
                    partition,
                    offset,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Notification acknowledged by broker"
                );
                Ok(PublishReceipt { partition, offset })
            }
            Err((kafka_err, _)) => {
                error!(
                    error = %kafka_err,
                    topic,
                    key,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Failed to publish notification"
                );
                Err(PublishError::Delivery {
                    topic: topic.to_string(),
                    cause: kafka_err.to_string(),
                })
            }
        }
    }
}
