//! Homework bot: review status poller
//!
//! A library for polling a homework review API and relaying
//! status changes and failures to a Telegram chat.

pub mod config;
pub mod notify;
pub mod poller;
pub mod review;
pub mod time;
pub mod transport;
