//! Scripted sessions: a list of store actions applied to a fresh store.
//!
//! Scripts are either a JSON array of actions or JSON Lines (one action per
//! line, blank lines and `#` comments ignored).

use taskboard_core::{Clock, TaskAction};
use thiserror::Error;
use tracing::debug;

use crate::store::TaskStore;

/// Errors raised while decoding a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The script is a JSON array that failed to decode.
    #[error("invalid action array: {0}")]
    Array(#[source] serde_json::Error),
    /// A JSON Lines entry failed to decode.
    #[error("invalid action on line {line}: {source}")]
    Line {
        /// One-based line number.
        line: usize,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Decode a script into actions.
///
/// # Errors
/// Returns an error when the array or any line fails to decode.
pub fn parse_script(raw: &str) -> Result<Vec<TaskAction>, ReplayError> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).map_err(ReplayError::Array);
    }
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Line {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Dispatch every action in order. Returns how many were applied.
pub fn replay<C: Clock>(store: &mut TaskStore<C>, actions: impl IntoIterator<Item = TaskAction>) -> usize {
    let mut applied = 0;
    for action in actions {
        store.dispatch(action);
        applied += 1;
    }
    debug!(applied, "replay finished");
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::{FixedClock, TaskFilter};
    use time::macros::datetime;

    const LINES: &str = r#"
# seed
{"type":"addTask","task":{"id":"1","title":"Write spec","dueDate":"2024-01-01"}}

{"type":"setFilter","filter":"completed"}
{"type":"markAsCompleted","id":"1"}
"#;

    #[test]
    fn parses_json_lines_with_comments() {
        let actions = parse_script(LINES).unwrap_or_else(|err| panic!("must parse: {err}"));
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[1].name(), "setFilter");
    }

    #[test]
    fn parses_json_arrays() {
        let raw = r#"[{"type":"setSearchTerm","searchTerm":"x"},{"type":"deleteTask","id":"1"}]"#;
        let actions = parse_script(raw).unwrap_or_else(|err| panic!("must parse: {err}"));
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn reports_offending_line() {
        let raw = "{\"type\":\"deleteTask\",\"id\":\"1\"}\n{\"type\":\"explode\"}\n";
        let err = parse_script(raw).err();
        assert!(matches!(err, Some(ReplayError::Line { line: 2, .. })));
    }

    #[test]
    fn empty_script_has_no_actions() {
        let actions = parse_script("\n# nothing\n").unwrap_or_else(|err| panic!("must parse: {err}"));
        assert!(actions.is_empty());
    }

    #[test]
    fn replay_applies_actions_in_order() {
        let actions = parse_script(LINES).unwrap_or_else(|err| panic!("must parse: {err}"));
        let mut store = TaskStore::with_clock(FixedClock::new(datetime!(2023-01-01 00:00 UTC)));
        assert_eq!(replay(&mut store, actions), 3);
        assert_eq!(store.filter(), TaskFilter::Completed);
        let visible: Vec<&str> = store.visible_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["1"]);
    }
}
