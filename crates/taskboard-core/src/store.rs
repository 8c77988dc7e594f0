use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::filter::TaskFilter;
use crate::id::TaskId;
use crate::projector::visible_tasks;
use crate::task::Task;

/// Mutations accepted by the store.
///
/// Serialized with a `type` tag so scripted sessions read like
/// `{"type":"markAsCompleted","id":"1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TaskAction {
    /// Append a task. Identifier uniqueness is not checked.
    AddTask {
        /// Task to append.
        task: Task,
    },
    /// Remove every task carrying the identifier.
    DeleteTask {
        /// Identifier to remove.
        id: TaskId,
    },
    /// Flag the first task with the identifier as completed.
    MarkAsCompleted {
        /// Identifier to complete.
        id: TaskId,
    },
    /// Replace the first task whose identifier equals `task.id`.
    EditTask {
        /// Replacement value.
        task: Task,
    },
    /// Replace the active filter.
    SetFilter {
        /// New filter.
        filter: TaskFilter,
    },
    /// Replace the active search term.
    #[serde(rename_all = "camelCase")]
    SetSearchTerm {
        /// New search term.
        search_term: String,
    },
}

impl TaskAction {
    /// Stable name of the action, used for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddTask { .. } => "addTask",
            Self::DeleteTask { .. } => "deleteTask",
            Self::MarkAsCompleted { .. } => "markAsCompleted",
            Self::EditTask { .. } => "editTask",
            Self::SetFilter { .. } => "setFilter",
            Self::SetSearchTerm { .. } => "setSearchTerm",
        }
    }
}

/// Task list plus view-filter state.
///
/// Fields are only reachable through [`StoreState::apply`] and
/// [`StoreState::reduce`]; readers get shared borrows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    tasks: Vec<Task>,
    filter: TaskFilter,
    search_term: String,
}

impl StoreState {
    /// Empty task list, `all` filter, empty search term.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure reducer: consume the state and return the next one.
    #[must_use]
    pub fn reduce(mut self, action: TaskAction) -> Self {
        self.apply(action);
        self
    }

    /// Apply an action in place. Never fails; unknown identifiers are no-ops.
    pub fn apply(&mut self, action: TaskAction) {
        match action {
            TaskAction::AddTask { task } => self.tasks.push(task),
            TaskAction::DeleteTask { id } => self.tasks.retain(|task| task.id != id),
            TaskAction::MarkAsCompleted { id } => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.completed = true;
                }
            }
            TaskAction::EditTask { task } => {
                if let Some(slot) = self.tasks.iter_mut().find(|existing| existing.id == task.id) {
                    *slot = task;
                }
            }
            TaskAction::SetFilter { filter } => self.filter = filter,
            TaskAction::SetSearchTerm { search_term } => self.search_term = search_term,
        }
    }

    /// Tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Active search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// First task with the identifier.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Project the visible tasks using the stored filter and search term.
    #[must_use]
    pub fn visible_tasks(&self, now: OffsetDateTime) -> Vec<&Task> {
        visible_tasks(&self.tasks, self.filter, &self.search_term, now).collect()
    }
}
