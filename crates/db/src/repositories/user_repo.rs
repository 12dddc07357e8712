//! Repository for the `users` table.

use questlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateNotificationPreferences, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, display_name, email, email_notifications, \
                       notify_session_created, notify_session_updated, created_at, updated_at";

/// Provides lookups and preference updates for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, display_name, email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every user whose id is in `ids` with a single query.
    ///
    /// Unknown ids are silently absent from the result. Rows are ordered by id.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<User>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update notification switches. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_notification_preferences(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNotificationPreferences,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email_notifications = COALESCE($2, email_notifications),
                notify_session_created = COALESCE($3, notify_session_created),
                notify_session_updated = COALESCE($4, notify_session_updated)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.email_notifications)
            .bind(input.session_created)
            .bind(input.session_updated)
            .fetch_optional(pool)
            .await
    }
}
