//! Read-only repository for the `game_sessions` table.

use questlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::game_session::GameSession;

const COLUMNS: &str = "id, campaign_id, session_number, title, scheduled_at, \
                       duration_hours, summary, created_at, updated_at";

pub struct GameSessionRepo;

impl GameSessionRepo {
    /// Find a session by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GameSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_sessions WHERE id = $1");
        sqlx::query_as::<_, GameSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a session by id, scoped to its owning campaign.
    ///
    /// Returns `None` when the session exists but belongs to another campaign.
    pub async fn find_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<GameSession>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM game_sessions WHERE id = $1 AND campaign_id = $2");
        sqlx::query_as::<_, GameSession>(&query)
            .bind(id)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }
}
