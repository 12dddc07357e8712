//! User entity model and DTOs.

use questlog_core::campaign::{NotificationPreferences, Recipient};
use questlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub email_notifications: bool,
    pub notify_session_created: bool,
    pub notify_session_updated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn notification_preferences(&self) -> NotificationPreferences {
        NotificationPreferences {
            email_notifications: self.email_notifications,
            session_created: self.notify_session_created,
            session_updated: self.notify_session_updated,
        }
    }
}

impl From<User> for Recipient {
    fn from(user: User) -> Self {
        let preferences = user.notification_preferences();
        Recipient {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            preferences,
        }
    }
}

/// DTO for creating a new user. Notification switches default to on.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
}

/// DTO for changing notification switches. Only `Some` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNotificationPreferences {
    pub email_notifications: Option<bool>,
    pub session_created: Option<bool>,
    pub session_updated: Option<bool>,
}
