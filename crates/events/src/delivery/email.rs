//! Email notification delivery via SMTP.
//!
//! [`SmtpMailer`] wraps the `lettre` async SMTP transport and sends
//! multipart (plain text + HTML) notification emails. Configuration is loaded
//! from environment variables; if SMTP credentials are missing,
//! [`EmailConfig::from_env`] returns `None` and the application falls back to
//! [`SimulatedMailer`], which logs each message and reports it undelivered.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// No SMTP transport is configured; the message was only logged.
    #[error("Email service not configured")]
    NotConfigured,

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Message types
// ---------------------------------------------------------------------------

/// A rendered message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Proof of a successful hand-off to the mail server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The `Message-ID` header assigned to the sent message.
    pub message_id: String,
}

/// Outbound mail capability used by the notifier.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message. Each call is independent of every other.
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, EmailError>;

    /// `true` when messages are only logged, never handed to a mail server.
    fn is_simulated(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP host when `SMTP_HOST` is not set.
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default display name in the `From` header.
const DEFAULT_FROM_NAME: &str = "Questlog";

/// Configuration for the SMTP email delivery service.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// Use implicit TLS instead of STARTTLS.
    pub secure: bool,
    /// SMTP username.
    pub smtp_user: String,
    /// SMTP password.
    pub smtp_password: String,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Display name paired with `from_address`.
    pub from_name: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("secure", &self.secure)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &"***")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_USER` or `SMTP_PASSWORD` is missing or empty,
    /// signalling that email delivery should be simulated.
    ///
    /// | Variable         | Required | Default           |
    /// |------------------|----------|-------------------|
    /// | `SMTP_HOST`      | no       | `smtp.gmail.com`  |
    /// | `SMTP_PORT`      | no       | `587`             |
    /// | `SMTP_SECURE`    | no       | `false`           |
    /// | `SMTP_USER`      | yes      | -                 |
    /// | `SMTP_PASSWORD`  | yes      | -                 |
    /// | `SMTP_FROM`      | no       | `SMTP_USER`       |
    /// | `SMTP_FROM_NAME` | no       | `Questlog`        |
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let smtp_user = non_empty("SMTP_USER")?;
        let smtp_password = non_empty("SMTP_PASSWORD")?;

        Some(Self {
            smtp_host: non_empty("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: non_empty("SMTP_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            secure: non_empty("SMTP_SECURE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(false),
            from_address: non_empty("SMTP_FROM").unwrap_or_else(|| smtp_user.clone()),
            from_name: non_empty("SMTP_FROM_NAME")
                .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            smtp_user,
            smtp_password,
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
///
/// The transport (and its connection pool) is built once in [`SmtpMailer::new`]
/// and reused for every message.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the SMTP transport from `config`.
    ///
    /// Fails if the sender address is invalid or the TLS parameters for the
    /// relay host cannot be created. No connection is opened here.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let from = Mailbox::new(Some(config.from_name.clone()), config.from_address.parse()?);

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(config.smtp_user, config.smtp_password))
            .build();

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            secure = config.secure,
            "SMTP mailer configured"
        );

        Ok(Self { transport, from })
    }

    /// Assemble the MIME message and the `Message-ID` it carries.
    fn build_message(&self, email: &OutgoingEmail) -> Result<(Message, String), EmailError> {
        let message_id = format!("<{}@{}>", uuid::Uuid::new_v4(), self.from.email.domain());

        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse::<Mailbox>()?)
            .subject(email.subject.as_str())
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        Ok((message, message_id))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, EmailError> {
        let (message, message_id) = self.build_message(email)?;
        self.transport.send(message).await?;

        tracing::info!(to = %email.to, message_id = %message_id, "Notification email sent");
        Ok(DeliveryReceipt { message_id })
    }
}

// ---------------------------------------------------------------------------
// SimulatedMailer
// ---------------------------------------------------------------------------

/// Development fallback used when no SMTP credentials are configured.
///
/// Logs the message content and always reports [`EmailError::NotConfigured`].
/// This is not a retryable failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedMailer;

#[async_trait]
impl Mailer for SimulatedMailer {
    fn is_simulated(&self) -> bool {
        true
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, EmailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text,
            "Email service not configured, logging message instead of sending"
        );
        Err(EmailError::NotConfigured)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
