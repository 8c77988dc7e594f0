use taskboard_core::{Clock, DueDate, DueDateError, SystemClock, Task, TaskFilter, TaskId};
use thiserror::Error;
use tracing::info;

use crate::store::TaskStore;

/// Validation failures detected before anything is dispatched.
#[derive(Debug, Error)]
pub enum DraftError {
    /// The title was left empty.
    #[error("title is required")]
    EmptyTitle,
    /// The due date is missing or not `YYYY-MM-DD`.
    #[error(transparent)]
    DueDate(#[from] DueDateError),
}

/// User-entered fields for a new or edited task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Required, stored as entered.
    pub title: String,
    /// Optional free text.
    pub description: String,
    /// `YYYY-MM-DD`.
    pub due_date: String,
}

impl TaskDraft {
    /// Prefill a draft from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.to_string(),
        }
    }

    /// Check the required fields and normalize them.
    ///
    /// # Errors
    /// Returns an error if the title is empty or the due date is missing or malformed.
    pub fn validate(&self) -> Result<ValidDraft, DraftError> {
        if self.title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let due_date = DueDate::parse(&self.due_date)?;
        Ok(ValidDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date,
        })
    }
}

/// Draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    title: String,
    description: String,
    due_date: DueDate,
}

/// Supplier of fresh task identifiers.
pub trait IdGenerator {
    /// Produce an identifier that has not been handed out before.
    fn next_id(&mut self) -> TaskId;
}

/// Random UUID v7 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> TaskId {
        TaskId::generate()
    }
}

/// Service façade used by presentation code: validates input, assigns ids and
/// reports whether a mutation had a visible effect.
pub struct TaskService<C = SystemClock, G = UuidGenerator> {
    store: TaskStore<C>,
    ids: G,
}

impl TaskService<SystemClock, UuidGenerator> {
    /// Service over an empty wall-clock store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(TaskStore::new(), UuidGenerator)
    }
}

impl Default for TaskService<SystemClock, UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, G: IdGenerator> TaskService<C, G> {
    /// Assemble a service from an explicit store and id source.
    pub const fn with_parts(store: TaskStore<C>, ids: G) -> Self {
        Self { store, ids }
    }

    /// Read access to the store.
    pub const fn store(&self) -> &TaskStore<C> {
        &self.store
    }

    /// Validate a draft and append it as a pending task.
    ///
    /// # Errors
    /// Returns an error if validation fails; nothing is dispatched in that case.
    pub fn create_task(&mut self, draft: &TaskDraft) -> Result<TaskId, DraftError> {
        let ValidDraft {
            title,
            description,
            due_date,
        } = draft.validate()?;
        let id = self.ids.next_id();
        self.store.add_task(Task::new(id.clone(), title, description, due_date));
        info!(task = %id, "task created");
        Ok(id)
    }

    /// Validate a draft and replace the stored task, keeping its id and completion flag.
    ///
    /// Returns `Ok(false)` when the task does not exist or nothing changed.
    ///
    /// # Errors
    /// Returns an error if validation fails; nothing is dispatched in that case.
    pub fn update_task(&mut self, id: &TaskId, draft: &TaskDraft) -> Result<bool, DraftError> {
        let ValidDraft {
            title,
            description,
            due_date,
        } = draft.validate()?;
        let Some(existing) = self.store.find(id) else {
            return Ok(false);
        };
        let updated = Task {
            id: id.clone(),
            title,
            description,
            due_date,
            completed: existing.completed,
        };
        if &updated == existing {
            return Ok(false);
        }
        self.store.edit_task(updated);
        info!(task = %id, "task edited");
        Ok(true)
    }

    /// Mark a task completed. Returns `false` if it was missing or already completed.
    pub fn complete_task(&mut self, id: &TaskId) -> bool {
        let pending = self.store.find(id).is_some_and(|task| !task.completed);
        if pending {
            self.store.mark_as_completed(id.clone());
            info!(task = %id, "task completed");
        }
        pending
    }

    /// Delete a task. Returns `false` if no task carried the id.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let exists = self.store.find(id).is_some();
        if exists {
            self.store.delete_task(id.clone());
            info!(task = %id, "task deleted");
        }
        exists
    }

    /// Replace the active filter.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.store.set_filter(filter);
    }

    /// Replace the active search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.store.set_search_term(term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::FixedClock;
    use time::macros::datetime;

    #[derive(Default)]
    struct SequentialIds(u32);

    impl IdGenerator for SequentialIds {
        fn next_id(&mut self) -> TaskId {
            self.0 += 1;
            TaskId::new(self.0.to_string())
        }
    }

    fn service() -> TaskService<FixedClock, SequentialIds> {
        let clock = FixedClock::new(datetime!(2024-06-01 00:00 UTC));
        TaskService::with_parts(TaskStore::with_clock(clock), SequentialIds::default())
    }

    fn draft(title: &str, due: &str) -> TaskDraft {
        TaskDraft {
            title: title.into(),
            description: String::new(),
            due_date: due.into(),
        }
    }

    fn ok<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err}"))
    }

    #[test]
    fn create_assigns_ids_and_defaults_completion() {
        let mut service = service();
        let first = ok(service.create_task(&draft("Write spec", "2024-01-01")), "create");
        let second = ok(service.create_task(&draft("Review", "2024-01-02")), "create");

        assert_eq!(first.as_str(), "1");
        assert_eq!(second.as_str(), "2");
        let tasks = service.store().tasks();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|task| !task.completed));
    }

    #[test]
    fn create_keeps_title_and_description_verbatim() {
        let mut service = service();
        let mut input = draft("  Padded  ", "2024-01-01");
        input.description = "  keep me  ".into();
        let id = ok(service.create_task(&input), "create");
        let task = service
            .store()
            .find(&id)
            .unwrap_or_else(|| panic!("task must exist"));
        assert_eq!(task.title, "  Padded  ");
        assert_eq!(task.description, "  keep me  ");
    }

    #[test]
    fn whitespace_title_is_not_empty() {
        let valid = ok(draft("   ", "2024-01-01").validate(), "validate");
        assert_eq!(valid.title, "   ");
        assert!(matches!(draft("", "2024-01-01").validate(), Err(DraftError::EmptyTitle)));
    }

    #[test]
    fn invalid_drafts_are_never_dispatched() {
        let mut service = service();
        assert!(matches!(
            service.create_task(&draft("", "2024-01-01")),
            Err(DraftError::EmptyTitle)
        ));
        assert!(matches!(
            service.create_task(&draft("Title", "")),
            Err(DraftError::DueDate(DueDateError::Empty))
        ));
        assert!(matches!(
            service.create_task(&draft("Title", "tomorrow")),
            Err(DraftError::DueDate(DueDateError::Invalid { .. }))
        ));
        assert!(service.store().tasks().is_empty());
    }

    #[test]
    fn update_keeps_completion_and_position() {
        let mut service = service();
        let first = ok(service.create_task(&draft("First", "2024-01-01")), "create");
        let second = ok(service.create_task(&draft("Second", "2024-01-01")), "create");
        assert!(service.complete_task(&first));

        let changed = ok(
            service.update_task(&first, &draft("First (edited)", "2024-02-02")),
            "update",
        );
        assert!(changed);
        let tasks = service.store().tasks();
        assert_eq!(tasks[0].id, first);
        assert_eq!(tasks[0].title, "First (edited)");
        assert!(tasks[0].completed);
        assert_eq!(tasks[1].id, second);
    }

    #[test]
    fn update_reports_no_change_for_identical_or_missing_tasks() {
        let mut service = service();
        let id = ok(service.create_task(&draft("Same", "2024-01-01")), "create");
        assert!(!ok(service.update_task(&id, &draft("Same", "2024-01-01")), "update"));
        assert!(!ok(
            service.update_task(&TaskId::from("ghost"), &draft("Ghost", "2024-01-01")),
            "update"
        ));
    }

    #[test]
    fn complete_and_delete_report_effects() {
        let mut service = service();
        let id = ok(service.create_task(&draft("Task", "2024-01-01")), "create");
        assert!(service.complete_task(&id));
        assert!(!service.complete_task(&id));
        assert!(service.delete_task(&id));
        assert!(!service.delete_task(&id));
        assert!(!service.complete_task(&id));
    }

    #[test]
    fn view_state_passes_through() {
        let mut service = service();
        service.set_filter(TaskFilter::Pending);
        service.set_search_term("abc");
        assert_eq!(service.store().filter(), TaskFilter::Pending);
        assert_eq!(service.store().search_term(), "abc");
    }

    #[test]
    fn draft_prefills_from_task() {
        let task = Task::new("x".into(), "Title", "Body", DueDate::new("2024-05-06"));
        let draft = TaskDraft::from_task(&task);
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.description, "Body");
        assert_eq!(draft.due_date, "2024-05-06");
    }
}
