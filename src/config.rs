use std::env;
use std::fmt;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub smtp_relay: String,
    pub smtp_identity: String,
    pub smtp_credential: String,
    pub smtp_timeout_secs: u64,
    pub receiving_address: Option<String>,
    pub allowed_origins: Vec<String>,
    pub site_owner: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable source. Blank values count as unset.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: var("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            smtp_relay: var("SMTP_RELAY").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_identity: var("SMTP_USER")
                .or_else(|| var("GMAIL_USER"))
                .map(|v| v.trim().to_string())
                .ok_or(ConfigError::MissingSmtpIdentity)?,
            smtp_credential: var("SMTP_PASS")
                .or_else(|| var("GMAIL_PASS"))
                .ok_or(ConfigError::MissingSmtpCredential)?,
            smtp_timeout_secs: var("SMTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout)?,
            receiving_address: var("RECEIVING_EMAIL").map(|v| v.trim().to_string()),
            allowed_origins: parse_origins(
                &var("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            site_owner: var("SITE_OWNER").map(|v| v.trim().to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Where submissions are delivered: the override if set, else the sending account.
    pub fn recipient(&self) -> &str {
        self.receiving_address
            .as_deref()
            .unwrap_or(&self.smtp_identity)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("smtp_relay", &self.smtp_relay)
            .field("smtp_identity", &self.smtp_identity)
            .field("smtp_credential", &"<redacted>")
            .field("smtp_timeout_secs", &self.smtp_timeout_secs)
            .field("receiving_address", &self.receiving_address)
            .field("allowed_origins", &self.allowed_origins)
            .field("site_owner", &self.site_owner)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid SMTP timeout")]
    InvalidTimeout,
    #[error("SMTP_USER environment variable is required")]
    MissingSmtpIdentity,
    #[error("SMTP_PASS environment variable is required")]
    MissingSmtpCredential,
    #[error("Invalid mail address {0:?}")]
    InvalidAddress(String),
    #[error("Invalid SMTP relay: {0}")]
    InvalidRelay(String),
    #[error("Invalid allowed origin {0:?}")]
    InvalidOrigin(String),
}
