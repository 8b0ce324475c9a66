//! In-memory [`NotificationPublisher`] that records every publish call.
//!
//! Every record lands on partition 0 with offsets assigned in call order.
//! A publisher built with [`InMemoryPublisher::failing`] rejects every call.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::publisher::{NotificationPublisher, PublishError, PublishReceipt};

/// One recorded publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRecord {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

#[derive(Default)]
pub struct InMemoryPublisher {
    records: Mutex<Vec<PublishedRecord>>,
    failure: Option<String>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every publish fails with the given cause.
    pub fn failing(cause: impl Into<String>) -> Self {
        Self {
            records: Mutex::default(),
            failure: Some(cause.into()),
        }
    }

    /// Snapshot of all successfully published records, in publish order.
    pub async fn records(&self) -> Vec<PublishedRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl NotificationPublisher for InMemoryPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<PublishReceipt, PublishError> {
        if let Some(cause) = &self.failure {
            return Err(PublishError::Delivery {
                topic: topic.to_string(),
                cause: cause.clone(),
            });
        }

        let mut records = self.records.lock().await;
        let offset = records.len() as i64;
        records.push(PublishedRecord {
            topic: topic.to_string(),
            key: key.to_string(),
            payload: payload.to_vec(),
        });

        Ok(PublishReceipt {
            partition: 0,
            offset,
        })
    }
}
