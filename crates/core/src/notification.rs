use serde::{Deserialize, Serialize};

use crate::directory::Party;

/// A resolved notification from one party to another.
///
/// Built fresh for each request and dropped once the publish completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub from: Party,
    pub to: Party,
    pub message: String,
}

impl Notification {
    pub fn new(from: Party, to: Party, message: impl Into<String>) -> Self {
        Self {
            from,
            to,
            message: message.into(),
        }
    }
}
