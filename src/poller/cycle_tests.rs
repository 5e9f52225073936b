//! Tests for the poll loop.

use crate::poller::{FailureKind, IterationReport, PollOutcome, PollState, Poller};
use crate::notify::{DeliveryError, Notifier};
use crate::review::{ReviewApi, ReviewError};
use crate::time::Sleeper;
use crate::transport::HttpError;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const INTERVAL: Duration = Duration::from_secs(600);

const APPROVED_HW1: &str =
    "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!";

/// Review API returning scripted results; an exhausted script yields an empty list.
#[derive(Debug, Default)]
struct ScriptedReview {
    results: Mutex<VecDeque<Result<Value, ReviewError>>>,
    requested_since: Mutex<Vec<i64>>,
}

impl ScriptedReview {
    fn new(results: Vec<Result<Value, ReviewError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            requested_since: Mutex::new(Vec::new()),
        }
    }

    fn since_values(&self) -> Vec<i64> {
        self.requested_since.lock().unwrap().clone()
    }
}

impl ReviewApi for ScriptedReview {
    async fn fetch_status(&self, since: i64) -> Result<Value, ReviewError> {
        self.requested_since.lock().unwrap().push(since);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"homeworks": []})))
    }
}

/// Notifier that records every attempt; scripted outcomes, success once exhausted.
#[derive(Debug, Default)]
struct RecordingNotifier {
    outcomes: Mutex<VecDeque<bool>>,
    attempts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// `outcomes[i]` is whether attempt `i` succeeds.
    fn scripted(outcomes: &[bool]) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.iter().copied().collect()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(message.to_string());
        if self.outcomes.lock().unwrap().pop_front().unwrap_or(true) {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: http::StatusCode::BAD_GATEWAY,
                description: None,
            })
        }
    }
}

/// Sleeper that returns immediately and counts calls.
#[derive(Debug, Default)]
struct CountingSleeper {
    calls: AtomicUsize,
    last: Mutex<Option<Duration>>,
}

impl Sleeper for CountingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(duration);
    }
}

type TestPoller = Poller<ScriptedReview, RecordingNotifier, CountingSleeper>;

fn poller(review: ScriptedReview, notifier: RecordingNotifier) -> TestPoller {
    Poller::new(review, notifier, INTERVAL).with_sleeper(CountingSleeper::default())
}

fn approved_response(current_date: i64) -> Result<Value, ReviewError> {
    Ok(json!({
        "homeworks": [{"homework_name": "hw1", "status": "approved"}],
        "current_date": current_date
    }))
}

fn unavailable() -> Result<Value, ReviewError> {
    Err(ReviewError::UpstreamUnavailable {
        status: http::StatusCode::SERVICE_UNAVAILABLE,
    })
}

mod check {
    use super::*;

    #[tokio::test]
    async fn status_change_yields_message_and_date() {
        let poller = poller(
            ScriptedReview::new(vec![approved_response(1000)]),
            RecordingNotifier::default(),
        );

        let outcome = poller.check(1).await.unwrap();

        assert_eq!(
            outcome,
            PollOutcome::StatusChanged {
                message: APPROVED_HW1.to_string(),
                current_date: Some(1000),
            }
        );
    }

    #[tokio::test]
    async fn empty_list_is_an_outcome_not_an_error() {
        let poller = poller(
            ScriptedReview::new(vec![Ok(json!({"homeworks": [], "current_date": 2000}))]),
            RecordingNotifier::default(),
        );

        assert_eq!(poller.check(1).await.unwrap(), PollOutcome::NoHomeworks);
    }

    #[tokio::test]
    async fn only_first_homework_is_considered() {
        let poller = poller(
            ScriptedReview::new(vec![Ok(json!({
                "homeworks": [
                    {"homework_name": "hw2", "status": "reviewing"},
                    {"homework_name": "hw1", "status": "bogus"}
                ],
                "current_date": 5
            }))]),
            RecordingNotifier::default(),
        );

        let outcome = poller.check(1).await.unwrap();

        assert!(matches!(
            outcome,
            PollOutcome::StatusChanged { message, .. } if message.contains("\"hw2\"")
        ));
    }
}

mod success_path {
    use super::*;

    #[tokio::test]
    async fn approved_homework_is_notified_and_timestamp_advances() {
        let poller = poller(
            ScriptedReview::new(vec![approved_response(1000)]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        let report = poller.poll_once(&mut state).await;

        assert_eq!(
            report,
            IterationReport::Notified {
                message: APPROVED_HW1.to_string()
            }
        );
        assert_eq!(poller.notifier.attempts(), vec![APPROVED_HW1.to_string()]);
        assert_eq!(state.last_timestamp(), 1000);
    }

    #[tokio::test]
    async fn next_fetch_continues_from_server_date() {
        let poller = poller(
            ScriptedReview::new(vec![approved_response(1000)]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        poller.poll_once(&mut state).await;
        poller.poll_once(&mut state).await;

        assert_eq!(poller.review.since_values(), vec![500, 1000]);
    }

    #[tokio::test]
    async fn failed_delivery_keeps_timestamp_and_reports_delivery_failure() {
        let poller = poller(
            ScriptedReview::new(vec![approved_response(1000)]),
            RecordingNotifier::scripted(&[false, true]),
        );
        let mut state = PollState::starting_at(500);

        let report = poller.poll_once(&mut state).await;

        assert_eq!(
            report,
            IterationReport::Failed {
                kind: FailureKind::Delivery,
                relayed: true
            }
        );
        assert_eq!(state.last_timestamp(), 500);
        let attempts = poller.notifier.attempts();
        assert_eq!(attempts.len(), 2);
        assert!(attempts[1].starts_with("Сбой в работе программы: "));
    }
}

mod failure_path {
    use super::*;

    #[tokio::test]
    async fn empty_list_is_relayed_as_failure() {
        let poller = poller(
            ScriptedReview::new(vec![Ok(json!({"homeworks": [], "current_date": 2000}))]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        let report = poller.poll_once(&mut state).await;

        assert_eq!(
            report,
            IterationReport::Failed {
                kind: FailureKind::EmptyResult,
                relayed: true
            }
        );
        assert_eq!(
            poller.notifier.attempts(),
            vec!["Сбой в работе программы: Пустой список домашних работ".to_string()]
        );
        assert_eq!(state.last_timestamp(), 500);
        assert_eq!(
            state.last_error_message(),
            "Сбой в работе программы: Пустой список домашних работ"
        );
    }

    #[tokio::test]
    async fn repeated_upstream_failure_is_relayed_once() {
        let poller = poller(
            ScriptedReview::new(vec![unavailable(), unavailable()]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        let first = poller.poll_once(&mut state).await;
        let second = poller.poll_once(&mut state).await;

        assert_eq!(
            first,
            IterationReport::Failed {
                kind: FailureKind::UpstreamUnavailable,
                relayed: true
            }
        );
        assert_eq!(
            second,
            IterationReport::Failed {
                kind: FailureKind::UpstreamUnavailable,
                relayed: false
            }
        );
        assert_eq!(poller.notifier.attempts().len(), 1);
        assert!(poller.notifier.attempts()[0].contains("503"));
    }

    #[tokio::test]
    async fn connectivity_failures_with_different_text_are_relayed_once() {
        let refused = |text: &str| -> Result<Value, ReviewError> {
            Err(ReviewError::Connectivity(HttpError::Connection(Box::new(
                std::io::Error::other(text.to_string()),
            ))))
        };
        let poller = poller(
            ScriptedReview::new(vec![refused("refused"), refused("reset by peer")]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        poller.poll_once(&mut state).await;
        poller.poll_once(&mut state).await;

        assert_eq!(poller.notifier.attempts().len(), 1);
    }

    #[tokio::test]
    async fn different_failure_is_relayed_again() {
        let poller = poller(
            ScriptedReview::new(vec![
                unavailable(),
                Ok(json!({"homeworks": [{"homework_name": "hw1", "status": "on_hold"}]})),
            ]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        poller.poll_once(&mut state).await;
        let report = poller.poll_once(&mut state).await;

        assert_eq!(
            report,
            IterationReport::Failed {
                kind: FailureKind::UnknownStatus,
                relayed: true
            }
        );
        assert_eq!(poller.notifier.attempts().len(), 2);
    }

    #[tokio::test]
    async fn malformed_response_is_classified() {
        let poller = poller(
            ScriptedReview::new(vec![Ok(json!({"homeworks": "none"}))]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        let report = poller.poll_once(&mut state).await;

        assert!(matches!(
            report,
            IterationReport::Failed {
                kind: FailureKind::MalformedResponse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unrelayed_failure_is_retried_next_time() {
        let poller = poller(
            ScriptedReview::new(vec![unavailable(), unavailable()]),
            RecordingNotifier::scripted(&[false, true]),
        );
        let mut state = PollState::starting_at(500);

        let first = poller.poll_once(&mut state).await;
        assert_eq!(state.last_error_message(), "");
        let second = poller.poll_once(&mut state).await;

        assert_eq!(
            first,
            IterationReport::Failed {
                kind: FailureKind::UpstreamUnavailable,
                relayed: false
            }
        );
        assert_eq!(
            second,
            IterationReport::Failed {
                kind: FailureKind::UpstreamUnavailable,
                relayed: true
            }
        );
        assert_eq!(poller.notifier.attempts().len(), 2);
    }

    #[tokio::test]
    async fn success_does_not_reset_last_failure() {
        let poller = poller(
            ScriptedReview::new(vec![unavailable(), approved_response(1000), unavailable()]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        poller.poll_once(&mut state).await;
        poller.poll_once(&mut state).await;
        let third = poller.poll_once(&mut state).await;

        assert_eq!(
            third,
            IterationReport::Failed {
                kind: FailureKind::UpstreamUnavailable,
                relayed: false
            }
        );
        assert_eq!(poller.notifier.attempts().len(), 2);
    }
}

mod sleeping {
    use super::*;

    #[tokio::test]
    async fn tick_sleeps_once_after_success() {
        let poller = poller(
            ScriptedReview::new(vec![approved_response(1000)]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        poller.tick(&mut state).await;

        assert_eq!(poller.sleeper.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*poller.sleeper.last.lock().unwrap(), Some(INTERVAL));
    }

    #[tokio::test]
    async fn tick_sleeps_once_after_failure() {
        let poller = poller(
            ScriptedReview::new(vec![unavailable(), unavailable()]),
            RecordingNotifier::default(),
        );
        let mut state = PollState::starting_at(500);

        poller.tick(&mut state).await;
        poller.tick(&mut state).await;

        assert_eq!(poller.sleeper.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn interval_is_exposed() {
        let poller = poller(ScriptedReview::default(), RecordingNotifier::default());
        assert_eq!(poller.interval(), INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn run_polls_once_per_interval_until_dropped() {
        let poller = Poller::new(
            ScriptedReview::default(),
            RecordingNotifier::default(),
            INTERVAL,
        );

        // Iterations start at t = 0, 600 and 1200 before the timeout at 1250.
        let result = tokio::time::timeout(
            Duration::from_secs(1250),
            poller.run(PollState::starting_at(500)),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(poller.review.since_values(), vec![500, 500, 500]);
        assert_eq!(poller.notifier.attempts().len(), 1);
    }
}
