//! Test doubles for the mail seam

use std::sync::Mutex;

use async_trait::async_trait;
use lettre::Message;

use super::{DeliveryError, MailTransport};
use crate::config::Config;

pub(crate) fn test_config() -> Config {
    Config {
        server_host: "localhost".to_string(),
        server_port: 5000,
        smtp_relay: "smtp.example.com".to_string(),
        smtp_identity: "relay@example.com".to_string(),
        smtp_credential: "test-password".to_string(),
        smtp_timeout_secs: 30,
        receiving_address: None,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        site_owner: Some("Jane Doe".to_string()),
    }
}

/// Records every message handed to it; optionally fails each attempt.
pub(crate) struct RecordingTransport {
    sent: Mutex<Vec<Message>>,
    attempts: Mutex<usize>,
    fail_with: Option<DeliveryError>,
}

impl RecordingTransport {
    pub(crate) fn accepting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
            fail_with: None,
        }
    }

    pub(crate) fn failing(error: DeliveryError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::accepting()
        }
    }

    pub(crate) fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: Message) -> Result<(), DeliveryError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
