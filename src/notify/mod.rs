//! Best-effort email notification for new contact messages.
//!
//! Delivery outcome never reaches the submitter: [`Notifier::notify`] logs
//! transport failures and returns.

mod smtp;

pub use smtp::SmtpMailer;

use crate::config::MailConfig;
use crate::db::ContactMessage;
use crate::error::MailError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A plain-text mail ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Self-addressed summary of a stored contact message.
    pub fn for_message(mailbox: &str, message: &ContactMessage) -> Self {
        Self {
            from: mailbox.to_string(),
            to: mailbox.to_string(),
            subject: format!("New Contact Message from {}", message.name),
            body: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                message.name, message.email, message.message
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), MailError>;
}

/// Used when delivery is turned off or no mailbox is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _notification: &Notification) -> Result<(), MailError> {
        Err(MailError::Disabled)
    }
}

#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    mailbox: Arc<str>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, mailbox: impl Into<Arc<str>>) -> Self {
        Self {
            mailer,
            mailbox: mailbox.into(),
        }
    }

    /// Builds the notifier described by `[mail]`, falling back to
    /// [`DisabledMailer`] when the transport cannot be set up.
    pub fn from_config(cfg: &MailConfig) -> Self {
        let mailbox = cfg.mailbox().unwrap_or_default().to_string();

        if !cfg.enabled {
            info!("Mail notifications disabled by configuration");
            return Self::new(Arc::new(DisabledMailer), mailbox);
        }
        if mailbox.is_empty() {
            warn!("mail.username is empty; contact notifications will not be sent");
            return Self::new(Arc::new(DisabledMailer), mailbox);
        }

        match SmtpMailer::from_config(cfg) {
            Ok(mailer) => {
                info!(
                    mail_server = %cfg.server,
                    mail_port = cfg.port,
                    mail_use_tls = cfg.use_tls,
                    mailbox = %mailbox,
                    "SMTP notifier configured"
                );
                Self::new(Arc::new(mailer), mailbox)
            }
            Err(e) => {
                warn!(error = %e, "SMTP transport setup failed; contact notifications will not be sent");
                Self::new(Arc::new(DisabledMailer), mailbox)
            }
        }
    }

    /// Sends one notification for `message`. Returns whether it was delivered;
    /// failures are logged and otherwise ignored.
    pub async fn notify(&self, message: &ContactMessage) -> bool {
        let notification = Notification::for_message(&self.mailbox, message);
        match self.mailer.send(&notification).await {
            Ok(()) => {
                info!(id = message.id, "contact notification sent");
                true
            }
            Err(MailError::Disabled) => {
                debug!(id = message.id, "contact notification skipped: mail disabled");
                false
            }
            Err(e) => {
                warn!(id = message.id, error = %e, "failed to send contact notification");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    fn sample() -> ContactMessage {
        ContactMessage {
            id: 7,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            message: "Hi".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<Notification>>);

    #[async_trait]
    impl Mailer for Recording {
        async fn send(&self, notification: &Notification) -> Result<(), MailError> {
            self.0.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn notification_is_self_addressed_summary() {
        let n = Notification::for_message("inbox@loonges.test", &sample());
        assert_eq!(n.from, "inbox@loonges.test");
        assert_eq!(n.to, "inbox@loonges.test");
        assert_eq!(n.subject, "New Contact Message from Alice");
        assert_eq!(n.body, "Name: Alice\nEmail: a@x.com\n\nMessage:\nHi");
    }

    #[tokio::test]
    async fn notify_sends_exactly_once() {
        let recording = Arc::new(Recording::default());
        let notifier = Notifier::new(recording.clone(), "inbox@loonges.test");

        assert!(notifier.notify(&sample()).await);
        assert_eq!(recording.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn disabled_mailer_reports_not_delivered() {
        let notifier = Notifier::new(Arc::new(DisabledMailer), "");
        assert!(!notifier.notify(&sample()).await);
    }

    #[tokio::test]
    async fn missing_mailbox_falls_back_to_disabled() {
        let notifier = Notifier::from_config(&MailConfig::default());
        assert!(notifier.mailbox.is_empty());
        assert!(!notifier.notify(&sample()).await);
    }
}
