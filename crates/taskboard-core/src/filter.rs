use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use time::OffsetDateTime;

use crate::task::Task;

/// Named predicate applied to the task list for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Completed tasks.
    Completed,
    /// Tasks not yet completed.
    Pending,
    /// Tasks whose due date has passed, regardless of completion.
    Overdue,
}

impl TaskFilter {
    /// Every filter in display order.
    pub const VARIANTS: [Self; 4] = [Self::All, Self::Completed, Self::Pending, Self::Overdue];

    /// Token used in scripts, CLI flags and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Label shown in the filter selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
        }
    }

    /// Evaluate the predicate for one task at `now`.
    #[must_use]
    pub fn matches(self, task: &Task, now: OffsetDateTime) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
            Self::Overdue => task.is_overdue(now),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for filter tokens outside the four known values.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter {token:?} (expected one of: all, completed, pending, overdue)")]
pub struct FilterParseError {
    /// Offending input.
    pub token: String,
}

impl FromStr for TaskFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            _ => Err(FilterParseError { token: s.to_owned() }),
        }
    }
}
