use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use taskboard_app::IdGenerator;
use taskboard_core::{Clock, TaskFilter};

use super::super::constants::{
    CONFIRM_HEIGHT, CONFIRM_MIN_WIDTH, CONFIRM_WIDTH_PERCENT, DETAILS_MIN_HEIGHT, DETAILS_MIN_WIDTH,
    DETAILS_POPUP_PERCENT, FILTER_PICKER_HEIGHT, FILTER_PICKER_MIN_WIDTH, FILTER_PICKER_WIDTH_PERCENT,
};
use super::super::view::Ui;
use crate::config::ViewType;
use super::detail_pane::task_detail_lines;
use super::util::{centered_popup, truncate_with_ellipsis};

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black))
}

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn draw_filter_picker_popup(&self, f: &mut Frame<'_>) {
        let Some(picker) = self.filter_picker else {
            return;
        };
        let popup_area = centered_popup(
            f.area(),
            FILTER_PICKER_WIDTH_PERCENT,
            FILTER_PICKER_MIN_WIDTH,
            FILTER_PICKER_HEIGHT,
        );

        let current = self.service.store().filter();
        let items: Vec<ListItem<'_>> = TaskFilter::VARIANTS
            .iter()
            .map(|&filter| {
                let marker = if filter == current { " (current)" } else { "" };
                ListItem::new(format!("{}{marker}", filter.label()))
            })
            .collect();

        let list = List::new(items)
            .block(popup_block("Filter"))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let mut state = ListState::default();
        state.select(Some(picker.selected));

        f.render_widget(Clear, popup_area);
        f.render_stateful_widget(list, popup_area, &mut state);
    }

    pub(in crate::tui) fn draw_confirm_delete_popup(&self, f: &mut Frame<'_>) {
        let Some(id) = &self.pending_delete else {
            return;
        };
        let popup_area = centered_popup(f.area(), CONFIRM_WIDTH_PERCENT, CONFIRM_MIN_WIDTH, CONFIRM_HEIGHT);
        let title = self
            .service
            .store()
            .find(id)
            .map_or("", |task| task.title.as_str());
        let max_title = usize::from(popup_area.width.saturating_sub(4));

        let lines = vec![
            Line::from("Are you sure you want to delete this task?"),
            Line::from(Span::styled(
                truncate_with_ellipsis(title, max_title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.keybindings.generate_help_text(ViewType::ConfirmDelete),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(popup_block("Delete task"));

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }

    pub(in crate::tui) fn draw_details_popup(&self, f: &mut Frame<'_>) {
        let Some(task) = self.details.as_ref().and_then(|id| self.service.store().find(id)) else {
            return;
        };
        let area = f.area();
        let height = (area.height.saturating_mul(DETAILS_POPUP_PERCENT) / 100).max(DETAILS_MIN_HEIGHT);
        let popup_area = centered_popup(area, DETAILS_POPUP_PERCENT, DETAILS_MIN_WIDTH, height);

        let paragraph = Paragraph::new(task_detail_lines(task, self.service.store().now()))
            .block(popup_block("Task details"))
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}
