use std::sync::Arc;

use notify_pipeline::NotificationPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolve/encode/publish pipeline shared by every request.
    pub pipeline: Arc<NotificationPipeline>,
}
