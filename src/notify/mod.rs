//! Notification layer for relaying messages to the chat recipient.
//!
//! This module provides:
//! - The notifier seam ([`Notifier`])
//! - The Telegram Bot API implementation ([`TelegramNotifier`])
//! - Error handling ([`DeliveryError`])

mod error;
mod telegram;

#[cfg(test)]
mod telegram_tests;

pub use error::DeliveryError;
pub use telegram::{DEFAULT_API_URL, TelegramNotifier};

/// Trait for sending text messages to the configured recipient.
///
/// This abstraction keeps the poll loop independent of the chat service
/// and enables testing with mocks.
pub trait Notifier: Send + Sync {
    /// Sends `message` to the recipient.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the message was not accepted.
    /// Implementations must not swallow failures.
    fn notify(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}
