//! Validated configuration after merging CLI, TOML and environment sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::review::oauth_header;

use super::cli::Cli;
use super::credentials::{Credentials, load_env_file, var};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args, an optional
/// TOML config and already loaded [`Credentials`]. [`ValidatedConfig::load`]
/// does the loading as well.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Tokens and chat id
    pub credentials: Credentials,

    /// Prebuilt `Authorization` header for the review API (marked sensitive)
    pub authorization: HeaderValue,

    /// Review API endpoint
    pub endpoint: Url,

    /// Telegram Bot API base URL
    pub telegram_api: Url,

    /// Wait between polls
    pub poll_interval: Duration,

    /// Timeout for each HTTP request
    pub request_timeout: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ endpoint: {}, telegram_api: {}, chat_id: {}, poll_interval: {}s, \
             request_timeout: {}s }}",
            self.endpoint,
            self.telegram_api,
            self.credentials.chat_id(),
            self.poll_interval.as_secs(),
            self.request_timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from its raw sources.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A URL is invalid or not http(s)
    /// - A duration is zero
    /// - The review token cannot be placed in an HTTP header
    pub fn from_raw(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        credentials: Credentials,
    ) -> Result<Self, ConfigError> {
        let endpoint = Self::resolve_endpoint(cli, toml)?;
        let telegram_api = Self::resolve_telegram_api(cli, toml)?;
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;
        let request_timeout = Self::resolve_request_timeout(cli, toml)?;

        let authorization = oauth_header(credentials.practicum_token()).map_err(|e| {
            ConfigError::InvalidCredential {
                name: var::PRACTICUM_TOKEN,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            credentials,
            authorization,
            endpoint,
            telegram_api,
            poll_interval,
            request_timeout,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from all sources.
    ///
    /// Loads the env file first, then the TOML file if `cli.config` is set,
    /// then reads credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The env file or config file cannot be read or parsed
    /// - Any credential is missing
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(path) = load_env_file(cli.env_file.as_deref())? {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        let credentials = Credentials::from_env()?;

        Self::from_raw(cli, toml.as_ref(), credentials)
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.review.endpoint.as_deref()))
            .unwrap_or(defaults::ENDPOINT);

        parse_http_url(field::ENDPOINT, url)
    }

    fn resolve_telegram_api(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url = cli
            .telegram_api
            .as_deref()
            .or_else(|| toml.and_then(|t| t.telegram.api_url.as_deref()))
            .unwrap_or(defaults::TELEGRAM_API_URL);

        parse_http_url(field::TELEGRAM_API, url)
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.poll.interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        non_zero_secs(field::POLL_INTERVAL, seconds)
    }

    fn resolve_request_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let seconds = cli
            .request_timeout
            .or_else(|| toml.and_then(|t| t.review.request_timeout))
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        non_zero_secs(field::REQUEST_TIMEOUT, seconds)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_http_url(field: &'static str, url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ConfigError::InvalidUrl {
            field,
            url: url.to_string(),
            reason: format!("unsupported scheme '{scheme}', expected http or https"),
        }),
    }
}

fn non_zero_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}
