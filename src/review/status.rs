//! Homework statuses, their verdicts, and message formatting.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::ReviewError;

/// Key holding the homework name in an API entry.
const NAME_KEY: &str = "homework_name";

/// Key holding the review status in an API entry.
const STATUS_KEY: &str = "status";

/// Review status of a homework submission.
///
/// The set is closed: any other value reported by the API is rejected
/// with [`ReviewError::UnknownStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work.
    Approved,
    /// A reviewer has picked the work up.
    Reviewing,
    /// The reviewer sent the work back with remarks.
    Rejected,
}

impl HomeworkStatus {
    /// All known statuses.
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Returns the wire value used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the human-readable verdict for this status.
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ReviewError::UnknownStatus {
                status: s.to_string(),
            })
    }
}

/// One homework entry, parsed from the API response.
///
/// Lives only for the iteration that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// Homework name as shown to the student
    pub name: String,
    /// Current review status
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// Parses a raw API entry.
    ///
    /// # Errors
    ///
    /// - [`ReviewError::MissingField`] if `homework_name` or `status` is absent
    ///   or not a string (a non-object entry is missing both)
    /// - [`ReviewError::UnknownStatus`] if `status` is not a documented value
    pub fn from_entry(entry: &Value) -> Result<Self, ReviewError> {
        let name = string_field(entry, NAME_KEY)?;
        let status = string_field(entry, STATUS_KEY)?.parse()?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    /// Formats the status-change notification for this homework.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Turns a raw API entry into the notification text for the student.
///
/// # Errors
///
/// See [`HomeworkRecord::from_entry`].
pub fn interpret_homework(entry: &Value) -> Result<String, ReviewError> {
    HomeworkRecord::from_entry(entry).map(|record| record.message())
}

fn string_field<'a>(entry: &'a Value, field: &'static str) -> Result<&'a str, ReviewError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ReviewError::MissingField { field })
}
