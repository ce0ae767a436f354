use serde::{Deserialize, Serialize};

use crate::error::{AppError, VALIDATION_MESSAGE};

/// Contact form payload as received. Every field may be missing or null.
#[derive(Debug, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission whose email and message are non-blank. Values are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: Option<String>,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(self) -> Result<ValidSubmission, AppError> {
        let (Some(email), Some(message)) = (non_blank(self.email), non_blank(self.message)) else {
            return Err(AppError::Validation(VALIDATION_MESSAGE.to_string()));
        };

        Ok(ValidSubmission {
            name: non_blank(self.name)
                .map(|name| single_line(&name))
                .filter(|name| !name.is_empty()),
            email,
            message,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Collapse runs of whitespace (line breaks included) to one space and drop
/// other control characters, so the name is safe as a header display name.
fn single_line(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// JSON body of every response: `{ "message": "..." }`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
