//! Review API layer: fetching, validating, and interpreting homework statuses.
//!
//! This module provides:
//! - The review API client seam ([`ReviewApi`]) and its HTTP implementation ([`PracticumClient`])
//! - Response shape validation ([`validate_response`], [`ReviewResponse`])
//! - Homework interpretation ([`HomeworkRecord`], [`HomeworkStatus`], [`interpret_homework`])
//! - Error handling ([`ReviewError`])

mod client;
mod error;
mod response;
mod status;


pub use client::{PracticumClient, ReviewApi, oauth_header};
pub use error::ReviewError;
pub use response::{ReviewResponse, validate_response};
pub use status::{HomeworkRecord, HomeworkStatus, interpret_homework};
