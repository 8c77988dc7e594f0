use crossterm::event::{KeyEvent, KeyEventKind};
use taskboard_app::IdGenerator;
use taskboard_core::Clock;

use super::super::view::{Focus, Ui, UiAction};
use crate::config::{Action, ViewType};

const TASK_LIST_ACTIONS: [Action; 10] = [
    Action::Quit,
    Action::Down,
    Action::Up,
    Action::FocusSearch,
    Action::CreateTask,
    Action::EditTask,
    Action::CompleteTask,
    Action::DeleteTask,
    Action::OpenFilterPicker,
    Action::OpenDetails,
];

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.focus {
            Focus::TaskList => return self.handle_task_list_key(key),
            Focus::Search => self.handle_search_key(key),
            Focus::FilterPicker => self.handle_filter_picker_key(key),
            Focus::ConfirmDelete => self.handle_confirm_delete_key(key),
            Focus::Details => self.handle_details_key(key),
        }
        None
    }

    fn handle_task_list_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        let action = TASK_LIST_ACTIONS
            .into_iter()
            .find(|&action| self.keybindings.matches(ViewType::TaskList, action, &key))?;

        match action {
            Action::Quit => self.should_quit = true,
            Action::Down => self.visibility.select_next(),
            Action::Up => self.visibility.select_prev(),
            Action::FocusSearch => self.focus = Focus::Search,
            Action::CreateTask => return Some(UiAction::CreateTask),
            Action::EditTask => {
                return self.selected_task_id().map_or_else(
                    || {
                        self.error("No task selected");
                        None
                    },
                    |task| Some(UiAction::EditTask { task }),
                );
            }
            Action::CompleteTask => self.complete_selected_task(),
            Action::DeleteTask => self.request_delete(),
            Action::OpenFilterPicker => self.open_filter_picker(),
            Action::OpenDetails => self.open_details(),
            _ => {}
        }
        None
    }

    pub(in crate::tui) fn open_details(&mut self) {
        let Some(id) = self.selected_task_id() else {
            self.error("No task selected");
            return;
        };
        self.details = Some(id);
        self.focus = Focus::Details;
    }

    fn handle_details_key(&mut self, key: KeyEvent) {
        if self
            .keybindings
            .matches(ViewType::DetailsViewer, Action::Close, &key)
        {
            self.details = None;
            self.focus = Focus::TaskList;
        }
    }
}
