//! External delivery channels for session notifications.
//!
//! Only email exists today. Mailers are constructed once at startup and
//! injected into the [`Notifier`](crate::Notifier) as `Arc<dyn Mailer>`.

pub mod email;
