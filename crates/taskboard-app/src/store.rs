use taskboard_core::{Clock, StoreState, SystemClock, Task, TaskAction, TaskFilter, TaskId};
use time::OffsetDateTime;
use tracing::debug;

/// Explicit state container owned by the application root.
///
/// All mutations go through [`TaskStore::dispatch`]; readers see the wrapped
/// [`StoreState`] through the accessors below.
#[derive(Debug, Default)]
pub struct TaskStore<C = SystemClock> {
    state: StoreState,
    clock: C,
}

impl TaskStore<SystemClock> {
    /// Empty store reading wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TaskStore<C> {
    /// Empty store using the provided clock for overdue checks.
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: StoreState::new(),
            clock,
        }
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: TaskAction) {
        debug!(action = action.name(), "dispatch");
        self.state.apply(action);
    }

    /// Append a task with a caller-assigned identifier.
    pub fn add_task(&mut self, task: Task) {
        self.dispatch(TaskAction::AddTask { task });
    }

    /// Remove tasks with the identifier.
    pub fn delete_task(&mut self, id: TaskId) {
        self.dispatch(TaskAction::DeleteTask { id });
    }

    /// Mark the task as completed.
    pub fn mark_as_completed(&mut self, id: TaskId) {
        self.dispatch(TaskAction::MarkAsCompleted { id });
    }

    /// Replace the task with the same identifier.
    pub fn edit_task(&mut self, task: Task) {
        self.dispatch(TaskAction::EditTask { task });
    }

    /// Replace the active filter.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.dispatch(TaskAction::SetFilter { filter });
    }

    /// Replace the active search term.
    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.dispatch(TaskAction::SetSearchTerm {
            search_term: search_term.into(),
        });
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    /// Active filter.
    pub const fn filter(&self) -> TaskFilter {
        self.state.filter()
    }

    /// Active search term.
    pub fn search_term(&self) -> &str {
        self.state.search_term()
    }

    /// First task with the identifier.
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.state.find(id)
    }

    /// Current instant according to the store clock.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Visible tasks for the stored filter and search term, evaluated now.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.state.visible_tasks(self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::{DueDate, FixedClock};
    use time::macros::datetime;

    fn store() -> TaskStore<FixedClock> {
        TaskStore::with_clock(FixedClock::new(datetime!(2024-06-01 00:00 UTC)))
    }

    fn task(id: &str, title: &str, due: &str) -> Task {
        Task::new(TaskId::from(id), title, "", DueDate::new(due))
    }

    #[test]
    fn starts_empty() {
        let store = store();
        assert!(store.tasks().is_empty());
        assert_eq!(store.filter(), TaskFilter::All);
        assert_eq!(store.search_term(), "");
    }

    #[test]
    fn operations_delegate_to_reducer() {
        let mut store = store();
        store.add_task(task("1", "Write spec", "2024-01-01"));
        store.add_task(task("2", "Ship", "2030-01-01"));
        store.mark_as_completed("1".into());
        store.edit_task(task("2", "Ship it", "2030-01-02"));
        store.delete_task("missing".into());

        assert_eq!(store.tasks().len(), 2);
        assert!(store.tasks()[0].completed);
        assert_eq!(store.tasks()[1].title, "Ship it");
        assert_eq!(store.find(&"2".into()).map(|t| t.due_date.as_str()), Some("2030-01-02"));
    }

    #[test]
    fn visible_tasks_use_stored_view_state_and_clock() {
        let mut store = store();
        store.add_task(task("1", "Write spec", "2024-01-01"));
        store.add_task(task("2", "Spec review", "2030-01-01"));
        store.add_task(task("3", "Lunch", "2020-01-01"));

        store.set_filter(TaskFilter::Overdue);
        store.set_search_term("SPEC");

        let ids: Vec<&str> = store.visible_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }
}
