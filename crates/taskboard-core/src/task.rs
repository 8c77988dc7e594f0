use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::id::TaskId;

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A unit of work shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Caller-assigned identifier.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Free-form description (may be empty).
    #[serde(default)]
    pub description: String,
    /// Calendar due date (`YYYY-MM-DD`).
    pub due_date: DueDate,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Build a pending task.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DueDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            due_date,
            completed: false,
        }
    }

    /// Whether the due date lies strictly before `now`.
    #[must_use]
    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        self.due_date.is_before(now)
    }
}

/// Errors raised while validating a due date entered by a user.
#[derive(Debug, Error)]
pub enum DueDateError {
    /// Nothing was entered.
    #[error("due date is required")]
    Empty,
    /// The text is not a calendar date.
    #[error("invalid due date {value:?} (expected YYYY-MM-DD): {source}")]
    Invalid {
        /// Text as entered.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: time::error::Parse,
    },
}

/// Due date kept in its ISO textual form.
///
/// The store stores whatever the caller supplied. Values that do not parse as
/// a calendar date are never considered overdue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    /// Wrap a raw value without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse and validate user input.
    ///
    /// # Errors
    /// Returns an error when the input is blank or not a `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> Result<Self, DueDateError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DueDateError::Empty);
        }
        let date = Date::parse(trimmed, DUE_DATE_FORMAT).map_err(|source| DueDateError::Invalid {
            value: trimmed.to_owned(),
            source,
        })?;
        Ok(Self::from(date))
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date, if the stored text is a valid ISO date.
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        Date::parse(self.0.trim(), DUE_DATE_FORMAT).ok()
    }

    /// Instant the date starts at (midnight UTC).
    #[must_use]
    pub fn instant(&self) -> Option<OffsetDateTime> {
        self.date()
            .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
    }

    /// Whether the date starts strictly before `now`.
    #[must_use]
    pub fn is_before(&self, now: OffsetDateTime) -> bool {
        self.instant().is_some_and(|due| due < now)
    }
}

impl From<Date> for DueDate {
    fn from(date: Date) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ))
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
