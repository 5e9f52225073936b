//! Loop state threaded through every iteration.

use super::FailureNotice;

/// Mutable state owned by the poll loop.
///
/// Created once at startup and discarded on exit; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    last_timestamp: i64,
    last_failure: Option<RelayedFailure>,
}

/// The last failure that was successfully relayed to the recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RelayedFailure {
    notice: FailureNotice,
    message: String,
}

impl PollState {
    /// Creates state that asks for changes since `timestamp` (Unix seconds).
    #[must_use]
    pub const fn starting_at(timestamp: i64) -> Self {
        Self {
            last_timestamp: timestamp,
            last_failure: None,
        }
    }

    /// Timestamp passed as `from_date` on the next fetch.
    ///
    /// 0 means "now".
    #[must_use]
    pub const fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    /// Text of the last relayed failure, or an empty string.
    #[must_use]
    pub fn last_error_message(&self) -> &str {
        self.last_failure
            .as_ref()
            .map_or("", |failure| failure.message.as_str())
    }

    /// Moves the fetch window to the server's `current_date`.
    ///
    /// A response without `current_date` resets the window to "now".
    pub fn advance_to(&mut self, current_date: Option<i64>) {
        self.last_timestamp = current_date.unwrap_or(0);
    }

    /// Returns true if `notice` differs from the last relayed failure.
    #[must_use]
    pub fn is_new_failure(&self, notice: &FailureNotice) -> bool {
        self.last_failure
            .as_ref()
            .is_none_or(|failure| failure.notice != *notice)
    }

    /// Remembers a failure that has just been relayed.
    pub fn record_failure(&mut self, notice: FailureNotice, message: String) {
        self.last_failure = Some(RelayedFailure { notice, message });
    }
}
