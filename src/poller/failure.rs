//! Failure taxonomy of the poll loop.

use std::fmt;

use thiserror::Error;

use crate::notify::DeliveryError;
use crate::review::ReviewError;
use crate::transport::HttpError;

/// Error raised by one poll iteration.
///
/// Every variant is recoverable: the loop reports it and tries again
/// after the regular sleep.
#[derive(Debug, Error)]
pub enum PollError {
    /// Fetching or interpreting the review status failed.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// The API reported no homework changes since the last poll.
    #[error("Пустой список домашних работ")]
    EmptyResult,

    /// The status-change notification was not delivered.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Closed set of failure kinds the loop can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The review API could not be reached.
    Connectivity,
    /// The review API answered with a non-200 status.
    UpstreamUnavailable,
    /// The review API response has the wrong shape.
    MalformedResponse,
    /// A homework entry lacks a required key.
    MissingField,
    /// A homework entry has an undocumented status.
    UnknownStatus,
    /// No homework changes were reported.
    EmptyResult,
    /// A chat message could not be delivered.
    Delivery,
}

impl FailureKind {
    /// Returns a stable snake-case name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::MalformedResponse => "malformed_response",
            Self::MissingField => "missing_field",
            Self::UnknownStatus => "unknown_status",
            Self::EmptyResult => "empty_result",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a failure for deduplication.
///
/// Two failures are "the same" when their kind and stable context match.
/// Context holds values such as the HTTP status or the missing key; it never
/// holds free-form transport error text, which varies between attempts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FailureNotice {
    /// What kind of failure occurred
    pub kind: FailureKind,
    /// Stable detail distinguishing failures of the same kind
    pub context: Option<String>,
}

impl FailureNotice {
    /// Creates a notice from its parts.
    #[must_use]
    pub const fn new(kind: FailureKind, context: Option<String>) -> Self {
        Self { kind, context }
    }
}

impl PollError {
    /// Classifies this error into its [`FailureKind`].
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Review(ReviewError::Connectivity(_)) => FailureKind::Connectivity,
            Self::Review(ReviewError::UpstreamUnavailable { .. }) => {
                FailureKind::UpstreamUnavailable
            }
            Self::Review(ReviewError::MalformedResponse { .. }) => FailureKind::MalformedResponse,
            Self::Review(ReviewError::MissingField { .. }) => FailureKind::MissingField,
            Self::Review(ReviewError::UnknownStatus { .. }) => FailureKind::UnknownStatus,
            Self::EmptyResult => FailureKind::EmptyResult,
            Self::Delivery(_) => FailureKind::Delivery,
        }
    }

    /// Builds the deduplication identity of this error.
    #[must_use]
    pub fn notice(&self) -> FailureNotice {
        let context = match self {
            Self::Review(ReviewError::Connectivity(e)) | Self::Delivery(DeliveryError::Transport(e)) => {
                Some(transport_context(e).to_string())
            }
            Self::Review(ReviewError::UpstreamUnavailable { status })
            | Self::Delivery(DeliveryError::Rejected { status, .. }) => {
                Some(status.as_u16().to_string())
            }
            Self::Review(ReviewError::MalformedResponse { reason }) => Some((*reason).to_string()),
            Self::Review(ReviewError::MissingField { field }) => Some((*field).to_string()),
            Self::Review(ReviewError::UnknownStatus { status }) => Some(status.clone()),
            Self::Delivery(DeliveryError::Encode(_)) => Some("encode".to_string()),
            Self::Delivery(DeliveryError::InvalidEndpoint { url }) => Some(url.clone()),
            Self::EmptyResult => None,
        };

        FailureNotice::new(self.kind(), context)
    }
}

const fn transport_context(error: &HttpError) -> &'static str {
    match error {
        HttpError::Connection(_) => "connection",
        HttpError::Timeout => "timeout",
        HttpError::InvalidUrl(_) => "invalid_url",
        HttpError::ClientBuild(_) => "client_build",
    }
}

/// Formats the text relayed to the recipient when an iteration fails.
#[must_use]
pub fn failure_message(error: &PollError) -> String {
    format!("Сбой в работе программы: {error}")
}
