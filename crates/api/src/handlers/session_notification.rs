//! Handler that triggers the session notification fan-out.
//!
//! The triggering action (creating or editing a session) happens elsewhere;
//! this endpoint only emails the campaign. Notification outcomes are
//! informational, so once the campaign and session exist the response is
//! always 200 with the aggregated [`FanOutResult`].

use axum::extract::{Path, State};
use axum::Json;
use questlog_core::campaign::{NotificationKind, SessionDetails};
use questlog_core::error::CoreError;
use questlog_core::types::DbId;
use questlog_db::repositories::{CampaignRepo, GameSessionRepo};
use questlog_events::FanOutResult;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the notify endpoint.
#[derive(Debug, Deserialize)]
pub struct NotifySessionRequest {
    /// `created` or `updated`.
    pub kind: String,
}

/// POST /api/v1/campaigns/{campaign_id}/sessions/{session_id}/notifications
///
/// Email every eligible campaign member about the session. Returns 404 when
/// the campaign does not exist or the session does not belong to it, and 400
/// for an unknown `kind`.
pub async fn notify_session_members(
    State(state): State<AppState>,
    Path((campaign_id, session_id)): Path<(DbId, DbId)>,
    Json(input): Json<NotifySessionRequest>,
) -> AppResult<Json<DataResponse<FanOutResult>>> {
    let kind: NotificationKind = input.kind.parse()?;

    let campaign = CampaignRepo::find_with_players(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    let session = GameSessionRepo::find_in_campaign(&state.pool, campaign_id, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Session",
            id: session_id,
        }))?;

    tracing::info!(
        campaign_id,
        session_id,
        kind = %kind,
        "Dispatching session notifications"
    );

    let details = SessionDetails::from(session);
    let result = state.notifier.notify(&campaign, &details, kind).await;

    Ok(Json(DataResponse { data: result }))
}
