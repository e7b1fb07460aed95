use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use super::dto::{RegisterRequest, RegisteredUser};
use crate::errors::ApiError;
use crate::mailer::{templates, MailMessage, Mailer};
use crate::metrics::MAILS_SENT_TOTAL;

#[derive(Clone)]
pub struct AuthService {
    mailer: Arc<dyn Mailer>,
    project_name: String,
}

impl AuthService {
    pub fn new(mailer: Arc<dyn Mailer>, project_name: impl Into<String>) -> Self {
        Self {
            mailer,
            project_name: project_name.into(),
        }
    }

    /// Register a user and send the welcome mail.
    ///
    /// A mail failure fails the registration.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisteredUser, ApiError> {
        let message = MailMessage {
            to: request.email.clone(),
            subject: format!("Welcome to {}", self.project_name),
            html: templates::welcome(Some(&request.first_name), &self.project_name),
        };

        let result = self.mailer.send_mail(message).await;
        let outcome = if result.is_ok() { "sent" } else { "failed" };
        MAILS_SENT_TOTAL.with_label_values(&[outcome]).inc();

        let sent = result
            .inspect_err(|e| warn!(to = %request.email, "Welcome mail failed: {}", e))
            .with_context(|| format!("Failed to send welcome mail to {}", request.email))?;

        info!(
            email = %request.email,
            message_id = %sent.message_id,
            "User registered"
        );

        Ok(RegisteredUser {
            username: format!("{} {}", request.first_name, request.last_name),
            email: request.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{classify, ErrorCode};
    use crate::mailer::{MailError, SentMail};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<MailMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_mail(&self, message: MailMessage) -> Result<SentMail, MailError> {
            if self.fail {
                return Err(MailError::Transport("relay unreachable".to_string()));
            }
            let to = message.to.clone();
            self.sent.lock().unwrap().push(message);
            Ok(SentMail {
                message_id: "<1@test>".to_string(),
                from: "team@example.com".to_string(),
                to,
            })
        }
    }

    fn request() -> RegisterRequest {
        RegisterRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_sends_welcome_mail() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = AuthService::new(mailer.clone(), "Acme");

        let user = service.register(request()).await.unwrap();
        assert_eq!(
            user,
            RegisteredUser {
                username: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            }
        );

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
        assert_eq!(sent[0].subject, "Welcome to Acme");
        assert!(sent[0].html.contains("Hi Jane,"));
    }

    #[tokio::test]
    async fn test_mail_failure_is_internal_error() {
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        });
        let service = AuthService::new(mailer, "Acme");

        let err = service.register(request()).await.unwrap_err();
        let payload = classify(&err);
        assert_eq!(payload.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload.error_code, Some(ErrorCode::InternalError));
        assert_eq!(
            payload.message,
            "Failed to send welcome mail to jane@example.com"
        );
    }
}
