use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};
use taskboard_app::{IdGenerator, TaskService, UuidGenerator};
use taskboard_core::{Clock, SystemClock, Task, TaskId};

use super::constants::UI_MESSAGE_TTL_SECS;
use super::task_visibility::TaskVisibility;
use crate::config::KeyBindingsConfig;

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    /// Browsing the task list.
    TaskList,
    /// Typing into the search bar.
    Search,
    /// Filter selector popup.
    FilterPicker,
    /// Delete confirmation dialog.
    ConfirmDelete,
    /// Task details popup.
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FilterPickerState {
    pub(super) selected: usize,
}

pub(super) struct Ui<C: Clock = SystemClock, G: IdGenerator = UuidGenerator> {
    pub(super) service: TaskService<C, G>,
    pub(super) visibility: TaskVisibility,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) focus: Focus,
    pub(super) filter_picker: Option<FilterPickerState>,
    /// Task awaiting delete confirmation.
    pub(super) pending_delete: Option<TaskId>,
    /// Task shown in the details popup.
    pub(super) details: Option<TaskId>,
    pub(super) keybindings: KeyBindingsConfig,
}

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(super) const SEARCH_HEIGHT: u16 = 3;
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 3;
    pub(super) const VIEW_STATE_HEIGHT: u16 = 3;
    pub(super) const STATUS_MESSAGE_MIN_HEIGHT: u16 = 3;
    pub(super) const STATUS_FOOTER_MIN_HEIGHT: u16 =
        Self::INSTRUCTIONS_HEIGHT + Self::VIEW_STATE_HEIGHT + Self::STATUS_MESSAGE_MIN_HEIGHT;

    pub(super) fn new(service: TaskService<C, G>, keybindings: KeyBindingsConfig) -> Self {
        let mut ui = Self {
            service,
            visibility: TaskVisibility::default(),
            message: None,
            should_quit: false,
            focus: Focus::TaskList,
            filter_picker: None,
            pending_delete: None,
            details: None,
            keybindings,
        };
        ui.rebuild_visibility(None);
        ui
    }

    pub(super) fn tasks(&self) -> &[Task] {
        self.service.store().tasks()
    }

    /// Re-project the store. Call after every dispatch with the id that
    /// should stay selected, captured before the mutation.
    pub(super) fn rebuild_visibility(&mut self, preferred: Option<&TaskId>) {
        let store = self.service.store();
        self.visibility.rebuild(
            store.tasks(),
            store.filter(),
            store.search_term(),
            store.now(),
            preferred,
        );
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.visibility.selected_task(self.tasks())
    }

    pub(super) fn selected_task_id(&self) -> Option<TaskId> {
        self.visibility.selected_task_id(self.tasks())
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::SEARCH_HEIGHT),
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::STATUS_FOOTER_MIN_HEIGHT),
            ])
            .split(f.area());

        self.draw_search_bar(f, chunks[0]);
        self.draw_main(f, chunks[1]);
        self.draw_status(f, chunks[2]);

        match self.focus {
            Focus::FilterPicker => self.draw_filter_picker_popup(f),
            Focus::ConfirmDelete => self.draw_confirm_delete_popup(f),
            Focus::Details => self.draw_details_popup(f),
            Focus::TaskList | Focus::Search => {}
        }
    }

    fn draw_main(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_task_list(f, columns[0]);
        self.draw_task_details(f, columns[1]);
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    /// Expire stale messages and re-evaluate `overdue` against the clock.
    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
        let keep = self.selected_task_id();
        self.rebuild_visibility(keep.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum UiAction {
    CreateTask,
    EditTask { task: TaskId },
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
