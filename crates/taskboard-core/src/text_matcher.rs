use crate::task::Task;

/// Case-insensitive substring matcher for task titles.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Build a matcher. Returns `None` for an empty query, which matches everything.
    ///
    /// Whitespace is significant: a query of spaces only matches titles
    /// containing those spaces.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Whether the task title contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::task::DueDate;

    fn titled(title: &str) -> Task {
        Task::new(TaskId::from("1"), title, "project notes", DueDate::new("2024-01-01"))
    }

    #[test]
    fn matcher_skips_empty_queries() {
        assert!(TextMatcher::new("").is_none());
    }

    #[test]
    fn whitespace_queries_are_literal() {
        let matcher =
            TextMatcher::new(" ").unwrap_or_else(|| panic!("matcher must exist for non-empty queries"));
        assert!(matcher.matches(&titled("My project")));
        assert!(!matcher.matches(&titled("Project")));
    }

    #[test]
    fn matcher_is_case_insensitive() {
        let task = titled("My project");
        for query in ["PROJ", "proj", "My P", "ject"] {
            let matcher =
                TextMatcher::new(query).unwrap_or_else(|| panic!("matcher must exist for {query}"));
            assert!(matcher.matches(&task), "{query} should match");
        }
    }

    #[test]
    fn matcher_only_looks_at_titles() {
        let matcher =
            TextMatcher::new("notes").unwrap_or_else(|| panic!("matcher must exist for non-empty queries"));
        assert!(!matcher.matches(&titled("My project")));
    }

    #[test]
    fn matcher_folds_non_ascii_case() {
        let matcher =
            TextMatcher::new("ÜBER").unwrap_or_else(|| panic!("matcher must exist for non-empty queries"));
        assert!(matcher.matches(&titled("über alles")));
    }
}
