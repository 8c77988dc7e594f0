//! Filter-then-search projection over the task list.
//!
//! The projection is recomputed on every call. `overdue` depends on `now`, so a
//! task can enter the overdue view purely through the passage of time.

use time::OffsetDateTime;

use crate::filter::TaskFilter;
use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// Tasks to render, in store order.
///
/// A task is visible when it satisfies `filter` at `now` and its title
/// contains `search_term` case-insensitively. The input is never mutated.
pub fn visible_tasks<'a>(
    tasks: &'a [Task],
    filter: TaskFilter,
    search_term: &str,
    now: OffsetDateTime,
) -> impl Iterator<Item = &'a Task> + use<'a> {
    let matcher = TextMatcher::new(search_term);
    tasks.iter().filter(move |task| {
        filter.matches(task, now) && matcher.as_ref().is_none_or(|matcher| matcher.matches(task))
    })
}
