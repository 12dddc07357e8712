use std::sync::Arc;

use questlog_events::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: questlog_db::DbPool,
    /// Session notification fan-out, with its mailer already injected.
    pub notifier: Arc<Notifier>,
}
