pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the notification route tree.
///
/// ```text
/// /send        POST form: fromID, toID, message
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/send", post(handlers::send::send_notification))
}
