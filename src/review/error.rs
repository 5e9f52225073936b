//! Error types for the review API layer.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for fetching and interpreting homework statuses.
///
/// Display strings are relayed verbatim to the chat recipient, so they
/// are written for the student, not the operator.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The request to the review API never produced a response.
    #[error("Отсутствует подключение: {0}")]
    Connectivity(#[source] HttpError),

    /// The review API answered with a status other than 200.
    #[error("Эндпоинт API-сервиса недоступен (код ответа {status})")]
    UpstreamUnavailable {
        /// The status code returned by the endpoint
        status: http::StatusCode,
    },

    /// The response body does not have the expected shape.
    #[error("Неверный тип данных: {reason}")]
    MalformedResponse {
        /// Which shape constraint was violated
        reason: &'static str,
    },

    /// A homework entry lacks a required key.
    #[error("Отсутствие ожидаемых ключей в ответе API: {field}")]
    MissingField {
        /// Name of the missing key
        field: &'static str,
    },

    /// A homework entry carries a status outside the documented set.
    #[error("Недокументированный статус ответа: {status}")]
    UnknownStatus {
        /// The status value as received
        status: String,
    },
}

/// Reasons attached to [`ReviewError::MalformedResponse`].
pub mod reason {
    /// The body could not be parsed as JSON.
    pub const NOT_JSON: &str = "тело ответа не является JSON";
    /// The top-level value is not a JSON object.
    pub const NOT_OBJECT: &str = "ответ не является словарём";
    /// The `homeworks` key is absent.
    pub const HOMEWORKS_MISSING: &str = "в ответе нет ключа homeworks";
    /// The `homeworks` value is not a list.
    pub const HOMEWORKS_NOT_LIST: &str = "homeworks не является списком";
}
