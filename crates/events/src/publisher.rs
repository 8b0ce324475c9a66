use async_trait::async_trait;
use notify_core::Party;

// ---------------------------------------------------------------------------
// Receipt / errors
// ---------------------------------------------------------------------------

/// Broker acknowledgment for a single published record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReceipt {
    pub partition: i32,
    pub offset: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The broker could not be reached while establishing the connection.
    #[error("failed to connect to broker: {0}")]
    Connect(String),

    /// The broker rejected the record or never acknowledged it.
    #[error("failed to deliver record to topic '{topic}': {cause}")]
    Delivery { topic: String, cause: String },

    /// Outstanding records could not be flushed on close.
    #[error("failed to flush producer: {0}")]
    Flush(String),

    /// The publisher was already closed.
    #[error("publisher is closed")]
    Closed,
}

// ---------------------------------------------------------------------------
// Publisher trait
// ---------------------------------------------------------------------------

/// Publishes encoded payloads to a keyed, partitioned topic.
///
/// `publish` resolves only once the broker has acknowledged the write, so a
/// returned [`PublishReceipt`] means the record was durably accepted.
/// Implementations must be safe to call concurrently from many tasks.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<PublishReceipt, PublishError>;
}

/// Partition key for a notification: the recipient id in decimal.
///
/// All notifications for one recipient share a key and therefore a partition.
pub fn routing_key(recipient: &Party) -> String {
    recipient.id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_key_is_decimal_id() {
        assert_eq!(routing_key(&Party::new(2, "Bruno")), "2");
        assert_eq!(routing_key(&Party::new(-15, "Neg")), "-15");
        assert_eq!(routing_key(&Party::new(1_000_000, "Big")), "1000000");
    }

    #[test]
    fn routing_key_ignores_name() {
        assert_eq!(
            routing_key(&Party::new(4, "Lena")),
            routing_key(&Party::new(4, "Someone else"))
        );
    }
}
