//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments. Credentials are not accepted here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Review API configuration section
    #[serde(default)]
    pub review: ReviewSection,

    /// Telegram configuration section
    #[serde(default)]
    pub telegram: TelegramSection,

    /// Polling configuration section
    #[serde(default)]
    pub poll: PollSection,
}

/// Review API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewSection {
    /// Homework statuses endpoint URL
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub request_timeout: Option<u64>,
}

/// Telegram configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramSection {
    /// Bot API base URL
    pub api_url: Option<String>,
}

/// Polling configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    /// Polling interval in seconds
    pub interval: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# homework-bot configuration file
#
# Credentials are NOT read from this file. Set them in the environment
# or in a .env file next to the binary:
#   PRACTICUM_TOKEN=...
#   TELEGRAM_TOKEN=...
#   TELEGRAM_CHAT_ID=...

[review]
# Homework statuses endpoint
# endpoint = "https://practicum.yandex.ru/api/user_api/homework_statuses/"

# Timeout for each HTTP request in seconds (default: 30)
# request_timeout = 30

[telegram]
# Bot API base URL, override for a self-hosted Bot API server
# api_url = "https://api.telegram.org/"

[poll]
# Seconds to wait between polls (default: 600)
interval = 600
"#
    .to_string()
}
