//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is fatal: the bot does not start polling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to load a `.env` file.
    #[error("Failed to load env file '{}': {source}", path.display())]
    EnvFile {
        /// Path to the env file
        path: PathBuf,
        /// Underlying dotenvy error
        #[source]
        source: dotenvy::Error,
    },

    /// One or more required credentials are absent or empty.
    #[error("Отсутствуют обязательные переменные окружения: {}", names.join(", "))]
    MissingCredentials {
        /// Names of the missing environment variables
        names: Vec<&'static str>,
    },

    /// A credential is present but unusable.
    #[error("Invalid value in {name}: {reason}")]
    InvalidCredential {
        /// Name of the environment variable
        name: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid URL provided.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        /// Name of the field
        field: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in error variants.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The review API endpoint.
    pub const ENDPOINT: &str = "endpoint";
    /// The Telegram Bot API base URL.
    pub const TELEGRAM_API: &str = "telegram_api";
    /// The polling interval.
    pub const POLL_INTERVAL: &str = "poll_interval";
    /// The request timeout.
    pub const REQUEST_TIMEOUT: &str = "request_timeout";
}
