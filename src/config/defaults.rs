//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default review API endpoint.
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const TELEGRAM_API_URL: &str = crate::notify::DEFAULT_API_URL;

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 600;

/// Default request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default `.env` file name, looked up in the working directory and its parents.
pub const ENV_FILE: &str = ".env";

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
