use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use taskboard_app::IdGenerator;
use taskboard_core::{Clock, Task};
use time::OffsetDateTime;

use super::super::constants::{
    COMPLETED_MARKER, OVERDUE_MARKER, TASK_LIST_HIGHLIGHT_SYMBOL, TASK_LIST_TITLE_MAX_CHARS,
};
use super::super::view::Ui;
use super::util::truncate_with_ellipsis;

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let now = self.service.store().now();
        let items = if self.visibility.has_visible_tasks() {
            self.visibility
                .visible_tasks(self.tasks())
                .map(|task| task_list_item(task, now))
                .collect()
        } else {
            let message = if self.tasks().is_empty() {
                "No tasks yet"
            } else {
                "No tasks match the current filter"
            };
            vec![ListItem::new(Line::from(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            )))]
        };

        let title = format!("Tasks ({}/{})", self.visibility.len(), self.tasks().len());
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if self.visibility.has_visible_tasks() {
            state.select(Some(self.visibility.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn task_list_item(task: &Task, now: OffsetDateTime) -> ListItem<'_> {
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut title = vec![Span::styled(
        truncate_with_ellipsis(&task.title, TASK_LIST_TITLE_MAX_CHARS),
        title_style,
    )];
    if task.completed {
        title.push(Span::styled(format!(" {COMPLETED_MARKER}"), Style::default().fg(Color::Green)));
    }
    if task.is_overdue(now) {
        title.push(Span::styled(format!(" {OVERDUE_MARKER}"), Style::default().fg(Color::Red)));
    }

    let meta = Span::styled(format!("due {}", task.due_date), Style::default().fg(Color::DarkGray));
    ListItem::new(vec![Line::from(title), Line::from(meta)])
}
