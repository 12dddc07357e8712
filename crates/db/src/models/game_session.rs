//! Game session entity model.

use questlog_core::campaign::SessionDetails;
use questlog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `game_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameSession {
    pub id: DbId,
    pub campaign_id: DbId,
    pub session_number: i32,
    pub title: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub duration_hours: Option<f64>,
    pub summary: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<GameSession> for SessionDetails {
    fn from(session: GameSession) -> Self {
        SessionDetails {
            session_number: session.session_number,
            title: session.title,
            date: session.scheduled_at,
            duration_hours: session.duration_hours,
            summary: session.summary,
        }
    }
}
