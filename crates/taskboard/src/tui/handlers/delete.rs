use crossterm::event::KeyEvent;
use taskboard_app::IdGenerator;
use taskboard_core::Clock;

use super::super::view::{Focus, Ui};
use crate::config::{Action, ViewType};

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn request_delete(&mut self) {
        let Some(id) = self.selected_task_id() else {
            self.error("No task selected");
            return;
        };
        self.pending_delete = Some(id);
        self.focus = Focus::ConfirmDelete;
    }

    pub(in crate::tui) fn handle_confirm_delete_key(&mut self, key: KeyEvent) {
        if self
            .keybindings
            .matches(ViewType::ConfirmDelete, Action::Confirm, &key)
        {
            self.confirm_delete();
        } else if self
            .keybindings
            .matches(ViewType::ConfirmDelete, Action::Cancel, &key)
        {
            self.cancel_delete();
        }
    }

    pub(in crate::tui) fn confirm_delete(&mut self) {
        self.focus = Focus::TaskList;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        if self.service.delete_task(&id) {
            self.rebuild_visibility(None);
            self.info("Task deleted");
        } else {
            self.error("The task no longer exists");
        }
    }

    pub(in crate::tui) fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.focus = Focus::TaskList;
    }
}
