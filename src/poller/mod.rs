//! Poll loop: fetch, validate, notify, sleep, repeat.
//!
//! This module provides:
//! - Process-lifetime loop state ([`PollState`])
//! - The closed failure taxonomy ([`PollError`], [`FailureKind`], [`FailureNotice`])
//! - The loop itself ([`Poller`]) and its per-iteration results
//!   ([`PollOutcome`], [`IterationReport`])

mod cycle;
mod failure;
mod state;


pub use cycle::{IterationReport, PollOutcome, Poller};
pub use failure::{FailureKind, FailureNotice, PollError, failure_message};
pub use state::PollState;
