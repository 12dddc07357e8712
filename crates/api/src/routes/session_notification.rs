//! Route definitions for session notifications under `/campaigns`.

use axum::routing::post;
use axum::Router;

use crate::handlers::session_notification;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// POST   /{campaign_id}/sessions/{session_id}/notifications -> notify_session_members
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{campaign_id}/sessions/{session_id}/notifications",
        post(session_notification::notify_session_members),
    )
}
