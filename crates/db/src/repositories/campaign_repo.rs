//! Read-only repository for `campaigns` and `campaign_players`.

use questlog_core::campaign::Campaign;
use questlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::CampaignRow;

const COLUMNS: &str = "id, name, game_master_id, created_at, updated_at";

/// Provides campaign lookups for the notification flow.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Find a campaign row by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CampaignRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, CampaignRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the user ids of a campaign's players, ordered by join time.
    pub async fn list_player_ids(pool: &PgPool, campaign_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM campaign_players \
             WHERE campaign_id = $1 \
             ORDER BY joined_at, user_id",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// Load a campaign together with its player ids.
    pub async fn find_with_players(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let Some(row) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let player_ids = Self::list_player_ids(pool, id).await?;
        Ok(Some(row.into_campaign(player_ids)))
    }
}
