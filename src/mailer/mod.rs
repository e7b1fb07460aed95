//! Transactional mail delivery

pub mod templates;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::config::MailerConfig;

/// Sender used when no mail transport is configured
pub const FALLBACK_SENDER: &str = "no-reply@localhost";

#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Receipt for a delivered message
#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub message_id: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("mail transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a message. The sender address is filled in by the mailer.
    async fn send_mail(&self, message: MailMessage) -> Result<SentMail, MailError>;
}

/// Mailer that records deliveries in the log instead of talking to a relay.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
    provider: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            provider: provider.into(),
        }
    }

    pub fn from_config(config: Option<&MailerConfig>) -> Self {
        match config {
            Some(config) => Self::new(config.email.clone(), config.provider.clone()),
            None => Self::new(FALLBACK_SENDER, "log"),
        }
    }

    pub fn sender(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_mail(&self, message: MailMessage) -> Result<SentMail, MailError> {
        if !message.to.contains('@') {
            return Err(MailError::InvalidRecipient(message.to));
        }

        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.provider);
        info!(
            message_id = %message_id,
            provider = %self.provider,
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            html_bytes = message.html.len(),
            "Mail dispatched"
        );

        Ok(SentMail {
            message_id,
            from: self.from.clone(),
            to: message.to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> MailMessage {
        MailMessage {
            to: to.to_string(),
            subject: "Hello".to_string(),
            html: "<p>hi</p>".to_string(),
        }
    }

    #[test]
    fn test_from_config_uses_sender() {
        let config = MailerConfig {
            email: "team@example.com".to_string(),
            app_password: "secret".to_string(),
            provider: "gmail".to_string(),
        };
        assert_eq!(LogMailer::from_config(Some(&config)).sender(), "team@example.com");
        assert_eq!(LogMailer::from_config(None).sender(), FALLBACK_SENDER);
    }

    #[test]
    fn test_send_fills_sender() {
        let mailer = LogMailer::new("team@example.com", "gmail");
        let sent = tokio_test::block_on(mailer.send_mail(message("jane@example.com"))).unwrap();
        assert_eq!(sent.from, "team@example.com");
        assert_eq!(sent.to, "jane@example.com");
        assert!(sent.message_id.ends_with("@gmail>"));
    }

    #[test]
    fn test_rejects_bad_recipient() {
        let mailer = LogMailer::new("team@example.com", "gmail");
        let err = tokio_test::block_on(mailer.send_mail(message("nobody"))).unwrap_err();
        assert!(matches!(err, MailError::InvalidRecipient(ref to) if to == "nobody"));
    }
}
