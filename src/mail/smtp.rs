use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{DeliveryError, MailTransport};
use crate::config::{Config, ConfigError};

/// Reply codes a relay uses to refuse authentication.
const AUTH_REPLY_CODES: [&str; 4] = ["530", "534", "535", "538"];

/// TLS relay with credentials, built once and shared across requests
pub struct SmtpRelay {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let creds = Credentials::new(
            config.smtp_identity.clone(),
            config.smtp_credential.clone(),
        );

        let inner = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_relay)
            .map_err(|e| ConfigError::InvalidRelay(e.to_string()))?
            .credentials(creds)
            .timeout(Some(Duration::from_secs(config.smtp_timeout_secs)))
            .build();

        Ok(Self { inner })
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn send(&self, message: Message) -> Result<(), DeliveryError> {
        self.inner
            .send(message)
            .await
            .map(|_| ())
            .map_err(DeliveryError::from)
    }
}

impl From<lettre::transport::smtp::Error> for DeliveryError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        let detail = err.to_string();

        if let Some(code) = err.status() {
            return classify_reply(&code.to_string(), detail);
        }

        if err.is_client() && detail.to_lowercase().contains("authentication") {
            DeliveryError::Auth(detail)
        } else if err.is_permanent() {
            DeliveryError::Rejected(detail)
        } else {
            // connection, TLS, timeout and IO failures
            DeliveryError::Transient(detail)
        }
    }
}

/// Classify by the three-digit SMTP reply code.
fn classify_reply(code: &str, detail: String) -> DeliveryError {
    if AUTH_REPLY_CODES.contains(&code) {
        DeliveryError::Auth(detail)
    } else if code.starts_with('4') {
        DeliveryError::Transient(detail)
    } else {
        DeliveryError::Rejected(detail)
    }
}
