use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Opaque identifier of a task.
///
/// The store never inspects or generates identifiers; callers assign one
/// before dispatching `addTask`. Any string is accepted.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap an existing identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh identifier (UUID v7 rendered as text).
    #[must_use]
    pub fn generate() -> Self {
        // v7 keeps creation order visible when ids are sorted.
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_v7() {
        let id = TaskId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap_or_else(|err| panic!("must parse uuid: {err}"));
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let first = TaskId::generate();
        let second = TaskId::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn arbitrary_strings_are_accepted() {
        let id: TaskId = "1".parse().unwrap_or_else(|err: Infallible| match err {});
        assert_eq!(id.as_str(), "1");
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&TaskId::from("abc"))
            .unwrap_or_else(|err| panic!("must serialize: {err}"));
        assert_eq!(json, "\"abc\"");
    }
}
