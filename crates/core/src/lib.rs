//! Domain model for the notification service.
//!
//! - [`directory`] — the read-only set of known parties.
//! - [`resolver`] — maps sender/recipient ids to directory entries.
//! - [`notification`] — the request-scoped notification value.
//! - [`codec`] — JSON wire encoding of notifications.

pub mod codec;
pub mod directory;
pub mod error;
pub mod notification;
pub mod resolver;
pub mod types;

pub use directory::{Directory, Party};
pub use notification::Notification;
