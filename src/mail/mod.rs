pub mod smtp;
pub mod template;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::{Address, Message};

use crate::config::{Config, ConfigError};
use crate::models::ValidSubmission;

/// Why a relay attempt failed. `Ok(())` from a transport means the email was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("relay refused credentials: {0}")]
    Auth(String),

    #[error("transient relay failure: {0}")]
    Transient(String),

    #[error("relay rejected message: {0}")]
    Rejected(String),
}

impl DeliveryError {
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryError::Auth(_) => "auth",
            DeliveryError::Transient(_) => "transient",
            DeliveryError::Rejected(_) => "rejected",
        }
    }

    /// Whether the same message could succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DeliveryError::Transient(_))
    }
}

/// Outbound mail seam, swapped for a recording double in tests.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: Message) -> Result<(), DeliveryError>;
}

/// Composes contact emails and hands them to a transport
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    from: Mailbox,
    to: Mailbox,
    site_owner: Option<String>,
}

impl Mailer {
    /// Mailer backed by the configured SMTP relay
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let relay = smtp::SmtpRelay::from_config(config)?;
        Self::with_transport(config, Arc::new(relay))
    }

    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            transport,
            from: parse_mailbox(&config.smtp_identity)?,
            to: parse_mailbox(config.recipient())?,
            site_owner: config.site_owner.clone(),
        })
    }

    /// Send one email for the submission. Single attempt, no retry.
    pub async fn send_contact(&self, submission: &ValidSubmission) -> Result<(), DeliveryError> {
        let message = self.compose(submission)?;
        self.transport.send(message).await?;

        tracing::info!(to = %self.to, has_name = submission.name.is_some(), "Contact email sent");
        Ok(())
    }

    pub fn compose(&self, submission: &ValidSubmission) -> Result<Message, DeliveryError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(template::subject(submission.name.as_deref()));

        match reply_to(submission) {
            Some(mailbox) => builder = builder.reply_to(mailbox),
            None => tracing::warn!("Submitted email is not a valid address, omitting Reply-To"),
        }

        let year = Utc::now().year();
        builder
            .multipart(MultiPart::alternative_plain_html(
                template::plain_text(submission),
                template::html(submission, year, self.site_owner.as_deref()),
            ))
            .map_err(|e| DeliveryError::Rejected(format!("failed to build email: {}", e)))
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidAddress(raw.to_string()))
}

fn reply_to(submission: &ValidSubmission) -> Option<Mailbox> {
    let address: Address = submission.email.parse().ok()?;
    // lettre cannot render a display name holding control characters
    let name = submission
        .name
        .clone()
        .filter(|name| !name.chars().any(char::is_control));
    Some(Mailbox::new(name, address))
}

#[cfg(test)]
mod tests {
    use super::mock::{test_config, RecordingTransport};
    use super::*;

    fn ann() -> ValidSubmission {
        ValidSubmission {
            name: Some("Ann".into()),
            email: "ann@x.com".into(),
            message: "Hi".into(),
        }
    }

    #[tokio::test]
    async fn test_send_contact_uses_identity_when_no_override() {
        let transport = Arc::new(RecordingTransport::accepting());
        let mailer = Mailer::with_transport(&test_config(), transport.clone()).unwrap();

        mailer.send_contact(&ann()).await.expect("Should send");

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        let to: Vec<String> = sent[0].envelope().to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, vec!["relay@example.com"]);
        assert_eq!(
            sent[0].envelope().from().map(|a| a.to_string()),
            Some("relay@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_send_contact_uses_receiving_override() {
        let mut config = test_config();
        config.receiving_address = Some("inbox@example.com".to_string());
        let transport = Arc::new(RecordingTransport::accepting());
        let mailer = Mailer::with_transport(&config, transport.clone()).unwrap();

        mailer.send_contact(&ann()).await.expect("Should send");

        let to: Vec<String> = transport.sent()[0]
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(to, vec!["inbox@example.com"]);
    }

    #[tokio::test]
    async fn test_send_contact_propagates_delivery_error() {
        let transport = Arc::new(RecordingTransport::failing(DeliveryError::Transient(
            "connection reset".into(),
        )));
        let mailer = Mailer::with_transport(&test_config(), transport.clone()).unwrap();

        let err = mailer.send_contact(&ann()).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(transport.attempts(), 1);
    }

    #[test]
    fn test_compose_headers() {
        let transport = Arc::new(RecordingTransport::accepting());
        let mailer = Mailer::with_transport(&test_config(), transport).unwrap();

        let message = mailer.compose(&ann()).expect("Should compose");
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: New Contact Message from Ann - Portfolio Site"));
        assert!(raw.contains("Reply-To: Ann <ann@x.com>"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_compose_with_multiline_name() {
        let transport = Arc::new(RecordingTransport::accepting());
        let mailer = Mailer::with_transport(&test_config(), transport).unwrap();
        let submission = ValidSubmission {
            name: Some("Ann\nSmith".into()),
            email: "ann@x.com".into(),
            message: "Hi".into(),
        };

        let message = mailer.compose(&submission).expect("Should compose");
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Reply-To: ann@x.com"));
    }

    #[test]
    fn test_compose_skips_unparseable_reply_to() {
        let transport = Arc::new(RecordingTransport::accepting());
        let mailer = Mailer::with_transport(&test_config(), transport).unwrap();
        let submission = ValidSubmission {
            name: None,
            email: "not an address".into(),
            message: "Hi".into(),
        };

        let message = mailer.compose(&submission).expect("Should compose");
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(!raw.contains("Reply-To"));
        assert!(raw.contains("Subject: New Contact Message from Anonymous - Portfolio Site"));
    }

    #[test]
    fn test_invalid_identity_is_config_error() {
        let mut config = test_config();
        config.smtp_identity = "not-an-address".to_string();
        let transport = Arc::new(RecordingTransport::accepting());

        let err = Mailer::with_transport(&config, transport).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidAddress(_)));
    }

    #[test]
    fn test_retryable_split() {
        assert!(DeliveryError::Transient("timeout".into()).is_retryable());
        assert!(!DeliveryError::Auth("535".into()).is_retryable());
        assert!(!DeliveryError::Rejected("550".into()).is_retryable());
    }
}

