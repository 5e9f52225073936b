//! Validation of the review API response shape.

use serde_json::Value;

use super::ReviewError;
use super::error::reason;

/// A review API response whose shape has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResponse {
    /// Homework entries, unmodified and in server order.
    pub homeworks: Vec<Value>,
    /// Server time of the response, used as the next `from_date`.
    ///
    /// `None` when the field is absent or not an integer.
    pub current_date: Option<i64>,
}

impl ReviewResponse {
    /// Returns the entry the bot reports on: the first one, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Checks that `raw` is an object with a `homeworks` list.
///
/// An empty list is valid; deciding what "nothing new" means is up to the caller.
///
/// # Errors
///
/// Returns [`ReviewError::MalformedResponse`] if `raw` is not an object,
/// or if `homeworks` is missing or not a list.
pub fn validate_response(raw: Value) -> Result<ReviewResponse, ReviewError> {
    let Value::Object(mut body) = raw else {
        return Err(ReviewError::MalformedResponse {
            reason: reason::NOT_OBJECT,
        });
    };

    let homeworks = match body.remove("homeworks") {
        Some(Value::Array(homeworks)) => homeworks,
        Some(_) => {
            return Err(ReviewError::MalformedResponse {
                reason: reason::HOMEWORKS_NOT_LIST,
            });
        }
        None => {
            return Err(ReviewError::MalformedResponse {
                reason: reason::HOMEWORKS_MISSING,
            });
        }
    };

    let current_date = body.get("current_date").and_then(Value::as_i64);

    Ok(ReviewResponse {
        homeworks,
        current_date,
    })
}
