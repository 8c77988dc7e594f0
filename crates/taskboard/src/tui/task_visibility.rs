use std::collections::HashMap;
use std::ptr;

use taskboard_core::{Task, TaskFilter, TaskId, visible_tasks};
use time::OffsetDateTime;

/// Projected rows and the list selection, independent of IO.
///
/// Rows are indexes into the store's task slice, so they must be rebuilt
/// after every dispatch.
#[derive(Debug, Default)]
pub(super) struct TaskVisibility {
    visible: Vec<usize>,
    visible_index: HashMap<TaskId, usize>,
    selected: usize,
}

impl TaskVisibility {
    pub(super) fn rebuild(
        &mut self,
        tasks: &[Task],
        filter: TaskFilter,
        search_term: &str,
        now: OffsetDateTime,
        preferred: Option<&TaskId>,
    ) {
        self.visible.clear();
        self.visible_index.clear();

        // The projector yields references into `tasks` in store order, so a
        // single forward walk recovers their positions.
        let mut projected = visible_tasks(tasks, filter, search_term, now).peekable();
        for (idx, task) in tasks.iter().enumerate() {
            if projected.next_if(|candidate| ptr::eq(*candidate, task)).is_some() {
                let pos = self.visible.len();
                self.visible.push(idx);
                self.visible_index.entry(task.id.clone()).or_insert(pos);
            }
        }

        self.selected = self.resolve_selection(preferred);
    }

    fn resolve_selection(&self, preferred: Option<&TaskId>) -> usize {
        if self.visible.is_empty() {
            return 0;
        }
        if let Some(id) = preferred
            && let Some(&index) = self.visible_index.get(id)
        {
            return index;
        }
        self.selected.min(self.visible.len() - 1)
    }

    pub(super) fn has_visible_tasks(&self) -> bool {
        !self.visible.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.visible.len()
    }

    #[cfg(test)]
    pub(super) fn visible_indexes(&self) -> &[usize] {
        &self.visible
    }

    pub(super) fn visible_tasks<'a>(&'a self, tasks: &'a [Task]) -> impl Iterator<Item = &'a Task> + 'a {
        self.visible.iter().filter_map(move |&idx| tasks.get(idx))
    }

    pub(super) const fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected_task<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.visible.get(self.selected).and_then(|&idx| tasks.get(idx))
    }

    pub(super) fn selected_task_id(&self, tasks: &[Task]) -> Option<TaskId> {
        self.selected_task(tasks).map(|task| task.id.clone())
    }

    pub(super) fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub(super) const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::DueDate;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 00:00 UTC);

    fn task(id: &str, title: &str, due: &str, completed: bool) -> Task {
        let mut task = Task::new(TaskId::from(id), title, "", DueDate::new(due));
        task.completed = completed;
        task
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", "Write spec", "2024-01-01", true),
            task("2", "Spec review", "2030-01-01", false),
            task("3", "Lunch", "2020-01-01", false),
        ]
    }

    #[test]
    fn rebuild_with_all_lists_every_task() {
        let tasks = sample();
        let mut visibility = TaskVisibility::default();
        visibility.rebuild(&tasks, TaskFilter::All, "", NOW, None);

        assert_eq!(visibility.visible_indexes(), &[0, 1, 2]);
        assert_eq!(visibility.selected_index(), 0);
        assert_eq!(visibility.selected_task_id(&tasks), Some(TaskId::from("1")));
    }

    #[test]
    fn rebuild_applies_filter_search_and_keeps_preferred_selection() {
        let tasks = sample();
        let mut visibility = TaskVisibility::default();
        visibility.rebuild(&tasks, TaskFilter::Pending, "", NOW, Some(&TaskId::from("3")));

        assert_eq!(visibility.visible_indexes(), &[1, 2]);
        assert_eq!(visibility.selected_task_id(&tasks), Some(TaskId::from("3")));

        visibility.rebuild(&tasks, TaskFilter::Overdue, "SPEC", NOW, Some(&TaskId::from("3")));
        assert_eq!(visibility.visible_indexes(), &[0]);
        assert_eq!(visibility.selected_task_id(&tasks), Some(TaskId::from("1")));
    }

    #[test]
    fn selection_is_clamped_when_rows_disappear() {
        let tasks = sample();
        let mut visibility = TaskVisibility::default();
        visibility.rebuild(&tasks, TaskFilter::All, "", NOW, None);
        visibility.select_next();
        visibility.select_next();
        assert_eq!(visibility.selected_index(), 2);

        visibility.rebuild(&tasks, TaskFilter::Completed, "", NOW, None);
        assert_eq!(visibility.selected_index(), 0);

        visibility.rebuild(&tasks, TaskFilter::Completed, "nothing", NOW, None);
        assert!(!visibility.has_visible_tasks());
        assert_eq!(visibility.selected_task(&tasks), None);
    }

    #[test]
    fn navigation_stays_within_bounds() {
        let tasks = sample();
        let mut visibility = TaskVisibility::default();
        visibility.rebuild(&tasks, TaskFilter::Pending, "", NOW, None);

        visibility.select_prev();
        assert_eq!(visibility.selected_index(), 0);
        visibility.select_next();
        visibility.select_next();
        assert_eq!(visibility.selected_task_id(&tasks), Some(TaskId::from("3")));
        assert_eq!(visibility.len(), 2);
    }

    #[test]
    fn duplicate_ids_select_first_visible_row() {
        let tasks = vec![task("dup", "First", "2030-01-01", false), task("dup", "Second", "2030-01-01", false)];
        let mut visibility = TaskVisibility::default();
        visibility.rebuild(&tasks, TaskFilter::All, "", NOW, Some(&TaskId::from("dup")));

        assert_eq!(visibility.visible_indexes(), &[0, 1]);
        let titles: Vec<&str> = visibility.visible_tasks(&tasks).map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(visibility.selected_index(), 0);
    }
}
