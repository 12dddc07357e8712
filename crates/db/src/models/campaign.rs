//! Campaign entity model.

use questlog_core::campaign::Campaign;
use questlog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `campaigns` table.
///
/// Player membership lives in `campaign_players`; use
/// [`CampaignRow::into_campaign`] to combine both into the domain type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignRow {
    pub id: DbId,
    pub name: String,
    pub game_master_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CampaignRow {
    pub fn into_campaign(self, player_ids: Vec<DbId>) -> Campaign {
        Campaign {
            id: self.id,
            name: self.name,
            player_ids,
            game_master_id: self.game_master_id,
        }
    }
}
