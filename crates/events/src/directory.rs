//! Recipient lookup for the notifier.
//!
//! [`UserDirectory`] resolves a whole member set in one call so the fan-out
//! never issues per-recipient queries. [`PgUserDirectory`] is the PostgreSQL
//! implementation backed by [`UserRepo::find_by_ids`].

use async_trait::async_trait;
use questlog_core::campaign::Recipient;
use questlog_core::types::DbId;
use questlog_db::repositories::UserRepo;
use questlog_db::DbPool;

/// Error type for recipient lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("User lookup failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Batched user lookup capability.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve every known user in `ids`. Unknown ids are absent from the result.
    async fn find_by_ids(&self, ids: &[DbId]) -> Result<Vec<Recipient>, DirectoryError>;
}

/// [`UserDirectory`] over the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_ids(&self, ids: &[DbId]) -> Result<Vec<Recipient>, DirectoryError> {
        let users = UserRepo::find_by_ids(&self.pool, ids).await?;
        Ok(users.into_iter().map(Recipient::from).collect())
    }
}
