//! Questlog notification infrastructure.
//!
//! - [`delivery`]: outbound mail channel ([`SmtpMailer`] for real delivery,
//!   [`SimulatedMailer`] when SMTP credentials are absent).
//! - [`directory`]: batched recipient lookup behind the [`UserDirectory`] trait.
//! - [`notifier`]: the session notification fan-out ([`Notifier`]).

pub mod delivery;
pub mod directory;
pub mod notifier;

pub use delivery::email::{
    DeliveryReceipt, EmailConfig, EmailError, Mailer, OutgoingEmail, SimulatedMailer, SmtpMailer,
};
pub use directory::{DirectoryError, PgUserDirectory, UserDirectory};
pub use notifier::{DeliveryResult, FanOutResult, Notifier, NotifierConfig};
