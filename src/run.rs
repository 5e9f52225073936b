//! Application execution logic.
//!
//! This module wires the configured HTTP client, review client and
//! notifier into a [`Poller`] and runs it until a shutdown signal.

use thiserror::Error;
use tokio::signal;

use homework_bot::config::ValidatedConfig;
use homework_bot::notify::{DeliveryError, TelegramNotifier};
use homework_bot::poller::{PollState, Poller};
use homework_bot::review::PracticumClient;
use homework_bot::time::{Clock, SystemClock};
use homework_bot::transport::{HttpError, ReqwestClient};

/// Type alias for the application's poller.
type AppPoller = Poller<PracticumClient<ReqwestClient>, TelegramNotifier<ReqwestClient>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// Failed to set up the Telegram notifier.
    #[error("Failed to create notifier: {0}")]
    Notifier(#[source] DeliveryError),
}

/// Builds the poller from validated configuration.
///
/// Both clients share one connection pool and the configured request timeout.
///
/// # Errors
///
/// Returns an error if the HTTP client or the notifier cannot be created.
fn build_poller(config: &ValidatedConfig) -> Result<AppPoller, RunError> {
    let http = ReqwestClient::with_timeout(config.request_timeout).map_err(RunError::HttpClient)?;

    let review = PracticumClient::new(
        http.clone(),
        config.endpoint.clone(),
        config.authorization.clone(),
    );

    let notifier = TelegramNotifier::new(
        http,
        &config.telegram_api,
        config.credentials.telegram_token(),
        config.credentials.chat_id(),
    )
    .map_err(RunError::Notifier)?;

    Ok(Poller::new(review, notifier, config.poll_interval))
}

/// Executes the main application loop.
///
/// Polls from the current time until Ctrl+C or SIGTERM arrives.
///
/// # Errors
///
/// Returns an error if the poller cannot be built.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// a real async runtime with signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let poller = build_poller(&config)?;
    let state = PollState::starting_at(SystemClock.unix_seconds());

    tracing::info!(
        "Polling every {}s, notifying chat {}",
        poller.interval().as_secs(),
        config.credentials.chat_id()
    );

    tokio::select! {
        biased;

        () = shutdown_signal() => {
            tracing::info!("Shutdown signal received, stopping...");
        }

        () = poller.run(state) => {}
    }

    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// A handler that cannot be installed is logged and never fires.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
