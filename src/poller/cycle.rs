//! The poll loop.

use std::time::Duration;

use super::{FailureKind, PollError, PollState, failure_message};
use crate::notify::Notifier;
use crate::review::{ReviewApi, interpret_homework, validate_response};
use crate::time::{Sleeper, TokioSleeper};

#[cfg(test)]
#[path = "cycle_tests.rs"]
mod tests;

/// Result of fetching and parsing one review API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The first homework has a status to report.
    StatusChanged {
        /// Notification text for the recipient
        message: String,
        /// Server time to continue from
        current_date: Option<i64>,
    },
    /// The response listed no homeworks.
    NoHomeworks,
}

/// What a single iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationReport {
    /// A status change was delivered.
    Notified {
        /// The text that was sent
        message: String,
    },
    /// The iteration failed.
    Failed {
        /// Classified failure
        kind: FailureKind,
        /// Whether a failure notice reached the recipient this time
        relayed: bool,
    },
}

/// Drives the fetch, validate, notify, sleep cycle.
///
/// # Type Parameters
///
/// * `R` - The [`ReviewApi`] to poll
/// * `N` - The [`Notifier`] that reaches the recipient
/// * `S` - The [`Sleeper`] used between iterations (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```ignore
/// use homework_bot::poller::{Poller, PollState};
/// use std::time::Duration;
///
/// let poller = Poller::new(review_client, notifier, Duration::from_secs(600));
/// poller.run(PollState::starting_at(now)).await;
/// ```
#[derive(Debug)]
pub struct Poller<R, N, S = TokioSleeper> {
    review: R,
    notifier: N,
    sleeper: S,
    interval: Duration,
}

impl<R, N> Poller<R, N, TokioSleeper> {
    /// Creates a poller that waits `interval` between iterations.
    #[must_use]
    pub const fn new(review: R, notifier: N, interval: Duration) -> Self {
        Self {
            review,
            notifier,
            sleeper: TokioSleeper,
            interval,
        }
    }
}

impl<R, N, S> Poller<R, N, S> {
    /// Sets a custom sleeper for the wait between iterations.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Poller<R, N, S2> {
        Poller {
            review: self.review,
            notifier: self.notifier,
            sleeper,
            interval: self.interval,
        }
    }

    /// Returns the wait between iterations.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl<R: ReviewApi, N: Notifier, S: Sleeper> Poller<R, N, S> {
    /// Fetches statuses since `since` and turns the response into an outcome.
    ///
    /// Only the first homework in the response is considered.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Review`] if fetching, validating or
    /// interpreting fails.
    pub async fn check(&self, since: i64) -> Result<PollOutcome, PollError> {
        let raw = self.review.fetch_status(since).await?;
        let response = validate_response(raw)?;

        let Some(latest) = response.latest() else {
            return Ok(PollOutcome::NoHomeworks);
        };

        Ok(PollOutcome::StatusChanged {
            message: interpret_homework(latest)?,
            current_date: response.current_date,
        })
    }

    /// Runs one iteration without the trailing sleep.
    pub async fn poll_once(&self, state: &mut PollState) -> IterationReport {
        match self.deliver_update(state).await {
            Ok(message) => IterationReport::Notified { message },
            Err(error) => self.handle_failure(state, &error).await,
        }
    }

    /// Runs one iteration followed by the fixed sleep.
    ///
    /// The sleep happens whether the iteration succeeded or failed.
    pub async fn tick(&self, state: &mut PollState) -> IterationReport {
        let report = self.poll_once(state).await;
        self.sleeper.sleep(self.interval).await;
        report
    }

    /// Polls forever. Never returns; stop it by dropping the future.
    pub async fn run(&self, mut state: PollState) {
        loop {
            self.tick(&mut state).await;
        }
    }

    async fn deliver_update(&self, state: &mut PollState) -> Result<String, PollError> {
        match self.check(state.last_timestamp()).await? {
            PollOutcome::NoHomeworks => Err(PollError::EmptyResult),
            PollOutcome::StatusChanged {
                message,
                current_date,
            } => {
                self.notifier.notify(&message).await?;
                state.advance_to(current_date);
                Ok(message)
            }
        }
    }

    async fn handle_failure(&self, state: &mut PollState, error: &PollError) -> IterationReport {
        let notice = error.notice();
        let kind = notice.kind;
        let message = failure_message(error);
        tracing::error!("{message}");

        if !state.is_new_failure(&notice) {
            tracing::debug!("Suppressing repeated {kind} failure notice");
            return IterationReport::Failed {
                kind,
                relayed: false,
            };
        }

        let relayed = match self.notifier.notify(&message).await {
            Ok(()) => {
                state.record_failure(notice, message);
                true
            }
            Err(e) => {
                tracing::error!("Failed to relay {kind} failure notice: {e}");
                false
            }
        };

        IterationReport::Failed { kind, relayed }
    }
}
