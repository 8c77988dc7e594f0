use crossterm::event::KeyEvent;
use taskboard_app::IdGenerator;
use taskboard_core::{Clock, TaskFilter};

use super::super::view::{FilterPickerState, Focus, Ui};
use crate::config::{Action, ViewType};

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn open_filter_picker(&mut self) {
        let current = self.service.store().filter();
        let selected = TaskFilter::VARIANTS
            .iter()
            .position(|filter| *filter == current)
            .unwrap_or(0);
        self.filter_picker = Some(FilterPickerState { selected });
        self.focus = Focus::FilterPicker;
    }

    pub(in crate::tui) fn handle_filter_picker_key(&mut self, key: KeyEvent) {
        let view = ViewType::FilterPicker;
        if self.keybindings.matches(view, Action::Close, &key) {
            self.close_filter_picker();
        } else if self.keybindings.matches(view, Action::Down, &key) {
            self.filter_picker_down();
        } else if self.keybindings.matches(view, Action::Up, &key) {
            self.filter_picker_up();
        } else if self.keybindings.matches(view, Action::Select, &key) {
            self.apply_filter_picker_selection();
        }
    }

    pub(in crate::tui) fn filter_picker_down(&mut self) {
        if let Some(picker) = &mut self.filter_picker {
            picker.selected = (picker.selected + 1).min(TaskFilter::VARIANTS.len() - 1);
        }
    }

    pub(in crate::tui) const fn filter_picker_up(&mut self) {
        if let Some(picker) = &mut self.filter_picker {
            picker.selected = picker.selected.saturating_sub(1);
        }
    }

    pub(in crate::tui) fn apply_filter_picker_selection(&mut self) {
        let Some(picker) = self.filter_picker.take() else {
            return;
        };
        self.focus = Focus::TaskList;
        let Some(&filter) = TaskFilter::VARIANTS.get(picker.selected) else {
            return;
        };
        if filter == self.service.store().filter() {
            self.info("Filter unchanged");
            return;
        }

        let keep = self.selected_task_id();
        self.service.set_filter(filter);
        self.rebuild_visibility(keep.as_ref());
        if self.visibility.has_visible_tasks() {
            self.info(format!("Showing: {}", filter.label()));
        } else {
            self.info(format!("Showing: {} (no matching tasks)", filter.label()));
        }
    }

    fn close_filter_picker(&mut self) {
        self.filter_picker = None;
        self.focus = Focus::TaskList;
    }
}
