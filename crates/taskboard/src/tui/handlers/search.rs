use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_app::IdGenerator;
use taskboard_core::Clock;

use super::super::view::{Focus, Ui};

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    /// Text entry for the search bar. Every edit dispatches a new search term.
    pub(in crate::tui) fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.focus = Focus::TaskList,
            KeyCode::Backspace => {
                let mut term = self.service.store().search_term().to_owned();
                if term.pop().is_some() {
                    self.update_search_term(term);
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.update_search_term(String::new());
            }
            KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                let mut term = self.service.store().search_term().to_owned();
                term.push(ch);
                self.update_search_term(term);
            }
            _ => {}
        }
    }

    pub(in crate::tui) fn update_search_term(&mut self, term: String) {
        let keep = self.selected_task_id();
        self.service.set_search_term(term);
        self.rebuild_visibility(keep.as_ref());
    }
}
