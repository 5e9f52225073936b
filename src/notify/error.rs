//! Error types for message delivery.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for sending a chat message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request to the messaging API never produced a response.
    #[error("Сбой при отправке сообщения в Telegram: {0}")]
    Transport(#[source] HttpError),

    /// The messaging API refused the message.
    #[error(
        "Сбой при отправке сообщения в Telegram: код ответа {status} ({})",
        .description.as_deref().unwrap_or("без описания")
    )]
    Rejected {
        /// HTTP status of the reply
        status: http::StatusCode,
        /// Error description returned by the API, if any
        description: Option<String>,
    },

    /// The request body could not be encoded.
    #[error("Сбой при отправке сообщения в Telegram: не удалось сформировать запрос")]
    Encode(#[source] serde_json::Error),

    /// The bot API base URL cannot carry a method path.
    #[error("Некорректный адрес Bot API: {url}")]
    InvalidEndpoint {
        /// The offending base URL
        url: String,
    },
}
