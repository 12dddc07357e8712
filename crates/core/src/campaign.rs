//! Campaign, session and recipient types used by the notification fan-out.
//!
//! These are read-only views: campaign and session management live
//! elsewhere, the notifier only consumes them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// The event that triggered a session notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Created,
    Updated,
}

impl NotificationKind {
    /// Stable lowercase name, as used in API payloads and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Created => "created",
            NotificationKind::Updated => "updated",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(NotificationKind::Created),
            "updated" => Ok(NotificationKind::Updated),
            other => Err(CoreError::Validation(format!(
                "Unknown notification kind '{other}' (expected 'created' or 'updated')"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

/// A tabletop campaign: a named group of players run by one game master.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub player_ids: Vec<DbId>,
    pub game_master_id: DbId,
}

impl Campaign {
    pub fn has_players(&self) -> bool {
        !self.player_ids.is_empty()
    }

    /// Every member id (players plus game master), de-duplicated and sorted.
    ///
    /// A game master who is also listed as a player appears once.
    pub fn member_ids(&self) -> Vec<DbId> {
        self.player_ids
            .iter()
            .copied()
            .chain(std::iter::once(self.game_master_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SessionDetails
// ---------------------------------------------------------------------------

/// The session fields that appear in a notification email.
///
/// Only the session number is mandatory; every other field may be absent
/// and is simply left out of the rendered message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDetails {
    pub session_number: i32,
    pub title: Option<String>,
    pub date: Option<Timestamp>,
    /// Planned length in hours.
    pub duration_hours: Option<f64>,
    pub summary: Option<String>,
}

// ---------------------------------------------------------------------------
// Recipients
// ---------------------------------------------------------------------------

/// Per-user email notification switches.
///
/// `email_notifications` is the master switch; the per-kind flags only
/// matter while it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub session_created: bool,
    pub session_updated: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            session_created: true,
            session_updated: true,
        }
    }
}

impl NotificationPreferences {
    /// Whether an email for `kind` may be sent to this user.
    pub fn allows(&self, kind: NotificationKind) -> bool {
        if !self.email_notifications {
            return false;
        }
        match kind {
            NotificationKind::Created => self.session_created,
            NotificationKind::Updated => self.session_updated,
        }
    }
}

/// A campaign member resolved from the user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub preferences: NotificationPreferences,
}

impl Recipient {
    /// Name used in greetings: the display name when set, else the username.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
