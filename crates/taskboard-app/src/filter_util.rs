use taskboard_core::{FilterParseError, TaskFilter};
use thiserror::Error;
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

/// Error type returned while building view queries from user-facing inputs.
#[derive(Debug, Error)]
pub enum FilterBuildError {
    /// Unknown filter token.
    #[error(transparent)]
    InvalidFilter(#[from] FilterParseError),
    /// Timestamp that is not RFC3339.
    #[error("invalid {field} timestamp: {source}")]
    InvalidTimestamp {
        /// Option the timestamp was given for.
        field: &'static str,
        /// Underlying parse failure.
        #[source]
        source: time::error::Parse,
    },
}

/// Result alias for query construction helpers.
pub type FilterBuildResult<T> = Result<T, FilterBuildError>;

/// Overrides applied on top of the store's own view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Filter to use instead of the stored one.
    pub filter: Option<TaskFilter>,
    /// Search term to use instead of the stored one.
    pub search_term: Option<String>,
    /// Instant to evaluate `overdue` against instead of the clock.
    pub now: Option<OffsetDateTime>,
}

impl ViewQuery {
    /// Filter to project with, falling back to `stored`.
    #[must_use]
    pub fn filter_or(&self, stored: TaskFilter) -> TaskFilter {
        self.filter.unwrap_or(stored)
    }

    /// Search term to project with, falling back to `stored`.
    #[must_use]
    pub fn search_term_or<'a>(&'a self, stored: &'a str) -> &'a str {
        self.search_term.as_deref().unwrap_or(stored)
    }

    /// Instant to project at, falling back to `clock_now`.
    #[must_use]
    pub fn now_or(&self, clock_now: OffsetDateTime) -> OffsetDateTime {
        self.now.unwrap_or(clock_now)
    }
}

/// Builder that accepts user-facing strings and normalizes them into a [`ViewQuery`].
#[derive(Debug, Clone, Default)]
pub struct ViewQueryBuilder {
    filter: Option<TaskFilter>,
    search_term: Option<String>,
    now: Option<OffsetDateTime>,
}

impl ViewQueryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the filter override from a token (`all`, `completed`, `pending`, `overdue`).
    ///
    /// # Errors
    /// Returns an error if the token is not one of the four filters.
    pub fn with_filter(mut self, token: Option<&str>) -> FilterBuildResult<Self> {
        self.filter = token.map(str::parse::<TaskFilter>).transpose()?;
        Ok(self)
    }

    /// Configure the search override. The term is kept verbatim.
    #[must_use]
    pub fn with_search_term(mut self, term: Option<String>) -> Self {
        self.search_term = term;
        self
    }

    /// Pin the evaluation instant using an RFC3339 string.
    ///
    /// # Errors
    /// Returns an error if the timestamp fails to parse.
    pub fn with_now(mut self, now: Option<&str>) -> FilterBuildResult<Self> {
        self.now = match now.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(
                parse_timestamp(raw)
                    .map(normalize_timestamp)
                    .map_err(|source| FilterBuildError::InvalidTimestamp { field: "now", source })?,
            ),
            None => None,
        };
        Ok(self)
    }

    /// Build the final [`ViewQuery`].
    #[must_use]
    pub fn build(self) -> ViewQuery {
        ViewQuery {
            filter: self.filter,
            search_term: self.search_term,
            now: self.now,
        }
    }
}

/// Parse an RFC3339 timestamp string.
///
/// # Errors
/// Returns an error if the string does not conform to RFC3339.
pub fn parse_timestamp(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(s.trim(), &Rfc3339)
}

/// Normalize timestamps to UTC to avoid offset mismatches across interfaces.
#[must_use]
pub const fn normalize_timestamp(dt: OffsetDateTime) -> OffsetDateTime {
    dt.to_offset(UtcOffset::UTC)
}
