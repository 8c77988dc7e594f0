use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use taskboard_app::IdGenerator;
use taskboard_core::Clock;

use super::super::view::{Focus, Message, Ui};
use crate::config::ViewType;

const SEARCH_HELP_TEXT: &str = "type:search ⌫:delete Ctrl+u:clear ↵/Esc:back to list";

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn draw_search_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let term = self.service.store().search_term();
        let (text, style) = if term.is_empty() && self.focus != Focus::Search {
            ("Press / to search titles", Style::default().fg(Color::DarkGray))
        } else {
            (term, Style::default())
        };
        let border_style = if self.focus == Focus::Search {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let search = Paragraph::new(text).style(style).block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(search, area);
    }

    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(Self::status_layout_constraints())
            .split(area);

        let instructions = Paragraph::new(self.instructions())
            .block(Block::default().title("Keys").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, rows[0]);

        let view_state = Paragraph::new(self.view_state_text())
            .block(Block::default().title("View").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(view_state, rows[1]);

        let message = Paragraph::new(self.status_text())
            .block(Block::default().title("Status").borders(Borders::ALL))
            .style(self.status_style());
        f.render_widget(message, rows[2]);
    }

    pub(in crate::tui) const fn status_layout_constraints() -> [Constraint; 3] {
        [
            Constraint::Length(Self::INSTRUCTIONS_HEIGHT),
            Constraint::Length(Self::VIEW_STATE_HEIGHT),
            Constraint::Min(Self::STATUS_MESSAGE_MIN_HEIGHT),
        ]
    }

    pub(in crate::tui) fn instructions(&self) -> String {
        let view = match self.focus {
            Focus::Search => return SEARCH_HELP_TEXT.to_owned(),
            Focus::TaskList => ViewType::TaskList,
            Focus::FilterPicker => ViewType::FilterPicker,
            Focus::ConfirmDelete => ViewType::ConfirmDelete,
            Focus::Details => ViewType::DetailsViewer,
        };
        self.keybindings.generate_help_text(view)
    }

    pub(in crate::tui) fn view_state_text(&self) -> String {
        let store = self.service.store();
        let search = store.search_term();
        let search = if search.is_empty() {
            Cow::Borrowed("(none)")
        } else {
            Cow::Owned(format!("\"{search}\""))
        };
        format!(
            "Filter: {} | Search: {} | {} of {} tasks",
            store.filter().label(),
            search,
            self.visibility.len(),
            store.tasks().len(),
        )
    }

    fn status_text(&self) -> &str {
        self.message.as_ref().map_or("", |msg| msg.text.as_str())
    }

    fn status_style(&self) -> Style {
        self.message.as_ref().map_or_else(Style::default, Message::style)
    }
}
