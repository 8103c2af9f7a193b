//! Configuration management for Campus Service
//!
//! Loads configuration from environment variables (a `.env` file is honoured).

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Directory / signup settings
    pub directory: DirectoryConfig,
    /// Content limits
    pub limits: LimitsConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub http_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Institutional email domain accepted at signup (without the `@`)
    pub email_domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_message_chars: usize,
    pub max_post_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

// Default values
fn default_http_port() -> u16 {
    8010
}

fn default_email_domain() -> String {
    "mylaurier.ca".to_string()
}

fn default_max_message_chars() -> usize {
    4000
}

fn default_max_post_chars() -> usize {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                env: "development".to_string(),
                host: "0.0.0.0".to_string(),
                http_port: default_http_port(),
            },
            directory: DirectoryConfig {
                email_domain: default_email_domain(),
            },
            limits: LimitsConfig::default(),
            logging: LoggingConfig {
                format: LogFormat::Text,
            },
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
            max_post_chars: default_max_post_chars(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_http_port),
        };

        let email_domain = std::env::var("CAMPUS_EMAIL_DOMAIN")
            .map(|d| d.trim().trim_start_matches('@').to_ascii_lowercase())
            .unwrap_or_else(|_| default_email_domain());
        if email_domain.is_empty() {
            return Err(ServiceError::Config(
                "CAMPUS_EMAIL_DOMAIN must not be empty".to_string(),
            )
            .into());
        }

        let limits = LimitsConfig {
            max_message_chars: std::env::var("MAX_MESSAGE_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or_else(default_max_message_chars),
            max_post_chars: std::env::var("MAX_POST_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or_else(default_max_post_chars),
        };

        let format = match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Config {
            app,
            directory: DirectoryConfig { email_domain },
            limits,
            logging: LoggingConfig { format },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app.host, self.app.http_port)
    }
}
