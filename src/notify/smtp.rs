use super::{Mailer, Notification};
use crate::config::MailConfig;
use crate::error::MailError;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::time::Duration;

/// SMTP delivery through a relay, with STARTTLS when `mail.use_tls` is set.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn from_config(cfg: &MailConfig) -> Result<Self, MailError> {
        let builder = if cfg.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&cfg.server)
        };

        let mut builder = builder
            .port(cfg.port)
            .timeout(Some(Duration::from_secs(cfg.timeout_secs)));
        if let Some(username) = cfg.mailbox() {
            builder = builder.credentials(Credentials::new(
                username.to_string(),
                cfg.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        let email = Message::builder()
            .from(notification.from.parse::<Mailbox>()?)
            .to(notification.to.parse::<Mailbox>()?)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())?;

        self.transport.send(email).await?;
        Ok(())
    }
}
