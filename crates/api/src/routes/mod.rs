pub mod health;
pub mod session_notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /campaigns/{campaign_id}/sessions/{session_id}/notifications   notify members (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/campaigns", session_notification::router())
}
