//! Credentials loaded from the environment.

use std::fmt;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Names of the environment variables holding credentials.
pub mod var {
    /// OAuth token for the review API.
    pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
    /// Telegram bot token.
    pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
    /// Chat that receives notifications.
    pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

    /// All required variables, in reporting order.
    pub const ALL: [&str; 3] = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];
}

/// The three secrets the bot needs to run.
///
/// `Debug` never prints the tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    practicum_token: String,
    telegram_token: String,
    chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Credentials {
    /// Reads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every variable
    /// that is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through an arbitrary lookup function.
    ///
    /// Values are trimmed; a value that is empty after trimming counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every variable
    /// that is unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = var::ALL.map(|name| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        });

        match values {
            [Some(practicum_token), Some(telegram_token), Some(chat_id)] => Ok(Self {
                practicum_token,
                telegram_token,
                chat_id,
            }),
            values => Err(ConfigError::MissingCredentials {
                names: var::ALL
                    .into_iter()
                    .zip(values)
                    .filter_map(|(name, value)| value.is_none().then_some(name))
                    .collect(),
            }),
        }
    }

    /// Creates credentials from explicit values without validation.
    #[must_use]
    pub fn new(
        practicum_token: impl Into<String>,
        telegram_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            practicum_token: practicum_token.into(),
            telegram_token: telegram_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Returns the review API token.
    #[must_use]
    pub fn practicum_token(&self) -> &str {
        &self.practicum_token
    }

    /// Returns the Telegram bot token.
    #[must_use]
    pub fn telegram_token(&self) -> &str {
        &self.telegram_token
    }

    /// Returns the recipient chat identifier.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

/// Loads a `.env` file into the process environment.
///
/// With an explicit `path` the file must exist. Without one, `.env` is looked
/// up from the working directory upwards and silently skipped when absent.
/// Variables already present in the environment are never overridden.
///
/// Returns the path of the file that was loaded, if any.
///
/// # Errors
///
/// Returns [`ConfigError::EnvFile`] if the file cannot be read or parsed.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Some(path.to_path_buf()));
    }

    match dotenvy::dotenv() {
        Ok(found) => Ok(Some(found)),
        Err(e) if e.not_found() => Ok(None),
        Err(source) => Err(ConfigError::EnvFile {
            path: PathBuf::from(super::defaults::ENV_FILE),
            source,
        }),
    }
}
