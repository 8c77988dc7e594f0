use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use taskboard_app::IdGenerator;
use taskboard_core::{Clock, Task};
use time::OffsetDateTime;

use super::super::view::Ui;

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn draw_task_details(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Details").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let paragraph = match self.selected_task() {
            Some(task) => Paragraph::new(task_detail_lines(task, self.service.store().now())),
            None => Paragraph::new("No task selected").style(Style::default().fg(Color::DarkGray)),
        };
        f.render_widget(paragraph.wrap(Wrap { trim: false }), inner);
    }
}

/// Every attribute of a task, shared by the side pane and the details popup.
pub(in crate::tui) fn task_detail_lines(task: &Task, now: OffsetDateTime) -> Vec<Line<'_>> {
    let status = match (task.completed, task.is_overdue(now)) {
        (true, true) => Span::styled("Completed (past due)", Style::default().fg(Color::Green)),
        (true, false) => Span::styled("Completed", Style::default().fg(Color::Green)),
        (false, true) => Span::styled("Pending (overdue)", Style::default().fg(Color::Red)),
        (false, false) => Span::raw("Pending"),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            task.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
        )),
        Line::from(format!("ID: {}", task.id)),
        Line::from(format!("Due: {}", task.due_date)),
        Line::from(vec![Span::raw("Status: "), status]),
        Line::from(""),
        Line::from(Span::styled("Description:", Style::default().add_modifier(Modifier::BOLD))),
    ];

    if task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            "No description.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(task.description.lines().map(Line::from));
    }
    lines
}
