//! Session notification fan-out.
//!
//! [`Notifier::notify`] emails every member of a campaign about a created or
//! updated session:
//!
//! 1. campaigns without players exit early with a failure result;
//! 2. members (players plus game master) are resolved in one batched lookup;
//! 3. each recipient is filtered by their notification preferences, rendered
//!    and delivered independently, so one failed send never affects another;
//! 4. per-recipient outcomes are aggregated into a [`FanOutResult`].
//!
//! Nothing escapes as an error: lookup failures become a single failure
//! result, delivery failures become per-recipient entries.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use questlog_core::campaign::{Campaign, NotificationKind, Recipient, SessionDetails};
use questlog_core::email_template::render_session_email;
use serde::Serialize;

use crate::delivery::email::{EmailError, Mailer, OutgoingEmail};
use crate::directory::UserDirectory;

/// Message returned when a campaign has nobody to notify.
pub const NO_PLAYERS_MESSAGE: &str = "No players in campaign";

/// Default per-send timeout.
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;

/// Default number of sends in flight per fan-out.
const DEFAULT_MAX_CONCURRENCY: usize = 4;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one delivery attempt. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    /// Recipient username.
    pub user: String,
    pub email: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Transport failure text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational text for non-error outcomes such as simulated sends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeliveryResult {
    fn new(recipient: &Recipient) -> Self {
        Self {
            user: recipient.username.clone(),
            email: recipient.email.clone(),
            success: false,
            message_id: None,
            error: None,
            message: None,
        }
    }
}

/// Aggregate outcome of one [`Notifier::notify`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanOutResult {
    /// `false` only for batch-level failures (no players, lookup failure).
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of successful deliveries.
    pub notifications_sent: usize,
    /// Number of resolved campaign members, including skipped ones.
    pub total_members: usize,
    /// One entry per attempted delivery, in completion order.
    pub results: Vec<DeliveryResult>,
}

impl FanOutResult {
    /// A batch-level failure with no per-recipient work performed.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            notifications_sent: 0,
            total_members: 0,
            results: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// NotifierConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for the fan-out.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Upper bound on a single send; exceeding it fails that recipient only.
    pub send_timeout: Duration,
    /// Sends in flight at once. `1` delivers strictly one after another.
    pub max_concurrency: usize,
    /// Application base URL; emails link to `{base}/campaigns/{id}` when set.
    pub app_base_url: Option<String>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(DEFAULT_SEND_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            app_base_url: None,
        }
    }
}

impl NotifierConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `EMAIL_SEND_TIMEOUT_SECS` | `10`    |
    /// | `NOTIFY_MAX_CONCURRENCY`  | `4`     |
    /// | `APP_BASE_URL`            | unset   |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let send_timeout_secs = var("EMAIL_SEND_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_SEND_TIMEOUT_SECS);

        let max_concurrency = var("NOTIFY_MAX_CONCURRENCY")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONCURRENCY);

        let app_base_url = var("APP_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Self {
            send_timeout: Duration::from_secs(send_timeout_secs),
            max_concurrency,
            app_base_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Emails campaign members about session changes.
///
/// Holds no per-call state; concurrent and repeated calls are independent.
pub struct Notifier {
    directory: Arc<dyn UserDirectory>,
    mailer: Arc<dyn Mailer>,
    config: NotifierConfig,
}

impl Notifier {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        mailer: Arc<dyn Mailer>,
        config: NotifierConfig,
    ) -> Self {
        Self {
            directory,
            mailer,
            config,
        }
    }

    /// Whether sends reach a real mail server.
    pub fn delivers_email(&self) -> bool {
        !self.mailer.is_simulated()
    }

    /// Notify every eligible member of `campaign` about `session`.
    pub async fn notify(
        &self,
        campaign: &Campaign,
        session: &SessionDetails,
        kind: NotificationKind,
    ) -> FanOutResult {
        if !campaign.has_players() {
            tracing::info!(
                campaign_id = campaign.id,
                kind = %kind,
                "Campaign has no players, skipping session notification"
            );
            return FanOutResult::failure(NO_PLAYERS_MESSAGE);
        }

        let member_ids = campaign.member_ids();
        let recipients = match self.directory.find_by_ids(&member_ids).await {
            Ok(recipients) => recipients,
            Err(e) => {
                tracing::error!(
                    campaign_id = campaign.id,
                    error = %e,
                    "Failed to resolve campaign members"
                );
                return FanOutResult::failure(e.to_string());
            }
        };

        self.fan_out(campaign, session, kind, recipients).await
    }

    /// Render and deliver to an already-resolved recipient list.
    ///
    /// Recipients are de-duplicated by id, so each user gets at most one
    /// message per call.
    pub async fn fan_out(
        &self,
        campaign: &Campaign,
        session: &SessionDetails,
        kind: NotificationKind,
        recipients: Vec<Recipient>,
    ) -> FanOutResult {
        let mut seen = HashSet::new();
        let recipients: Vec<Recipient> = recipients
            .into_iter()
            .filter(|r| seen.insert(r.id))
            .collect();
        let total_members = recipients.len();

        let eligible: Vec<&Recipient> = recipients
            .iter()
            .filter(|r| {
                let allowed = r.preferences.allows(kind);
                if !allowed {
                    tracing::debug!(
                        user = %r.username,
                        kind = %kind,
                        "Recipient opted out of this notification"
                    );
                }
                allowed
            })
            .collect();

        let deliveries: Vec<_> = eligible
            .into_iter()
            .map(|recipient| self.deliver_to(campaign, session, kind, recipient))
            .collect();
        let results: Vec<DeliveryResult> = stream::iter(deliveries)
            .buffer_unordered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let notifications_sent = results.iter().filter(|r| r.success).count();

        tracing::info!(
            campaign_id = campaign.id,
            session_number = session.session_number,
            kind = %kind,
            attempted = results.len(),
            notifications_sent,
            total_members,
            "Session notification fan-out complete"
        );

        FanOutResult {
            success: true,
            message: None,
            notifications_sent,
            total_members,
            results,
        }
    }

    /// Render and send a single message, converting every outcome into a result.
    async fn deliver_to(
        &self,
        campaign: &Campaign,
        session: &SessionDetails,
        kind: NotificationKind,
        recipient: &Recipient,
    ) -> DeliveryResult {
        let campaign_url = self
            .config
            .app_base_url
            .as_deref()
            .map(|base| format!("{base}/campaigns/{}", campaign.id));
        let rendered = render_session_email(
            kind,
            &campaign.name,
            session,
            recipient,
            campaign_url.as_deref(),
        );
        let email = OutgoingEmail {
            to: recipient.email.clone(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };

        let mut result = DeliveryResult::new(recipient);
        match tokio::time::timeout(self.config.send_timeout, self.mailer.send(&email)).await {
            Ok(Ok(receipt)) => {
                result.success = true;
                result.message_id = Some(receipt.message_id);
            }
            Ok(Err(EmailError::NotConfigured)) => {
                result.message = Some(EmailError::NotConfigured.to_string());
            }
            Ok(Err(e)) => {
                tracing::warn!(user = %recipient.username, error = %e, "Notification email failed");
                result.error = Some(e.to_string());
            }
            Err(_) => {
                let secs = self.config.send_timeout.as_secs_f64();
                tracing::warn!(user = %recipient.username, timeout_secs = secs, "Notification email timed out");
                result.error = Some(format!("Delivery timed out after {secs}s"));
            }
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
