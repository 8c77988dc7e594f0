use std::io::Stdout;

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use taskboard_app::IdGenerator;
use taskboard_core::{Clock, TaskId};

use super::super::editor::{edit_task_editor_template, new_task_editor_template, parse_task_editor_output};
use super::super::terminal::{launch_editor, with_terminal_suspended};
use super::super::view::{Ui, UiAction};

pub(super) fn handle_ui_action<C: Clock, G: IdGenerator>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui<C, G>,
    action: UiAction,
) -> Result<()> {
    match action {
        UiAction::CreateTask => {
            let template = new_task_editor_template();
            let raw = with_terminal_suspended(terminal, || launch_editor(&template))?;
            ui.apply_new_task_input(&raw);
        }
        UiAction::EditTask { task } => {
            let Some(template) = ui.service.store().find(&task).map(edit_task_editor_template) else {
                ui.error("The task to edit no longer exists");
                return Ok(());
            };
            let raw = with_terminal_suspended(terminal, || launch_editor(&template))?;
            ui.apply_edit_task_input(&task, &raw);
        }
    }
    Ok(())
}

impl<C: Clock, G: IdGenerator> Ui<C, G> {
    pub(in crate::tui) fn apply_new_task_input(&mut self, raw: &str) {
        match parse_task_editor_output(raw) {
            Ok(Some(draft)) => match self.service.create_task(&draft) {
                Ok(id) => {
                    self.rebuild_visibility(Some(&id));
                    if self.selected_task_id().as_ref() == Some(&id) {
                        self.info(format!("Created task: {}", draft.title.trim()));
                    } else {
                        self.info(format!(
                            "Created task (hidden by the current filter or search): {}",
                            draft.title.trim()
                        ));
                    }
                }
                Err(err) => self.error(format!("Task not created: {err}")),
            },
            Ok(None) => self.info("Task creation cancelled"),
            Err(msg) => self.error(msg),
        }
    }

    pub(in crate::tui) fn apply_edit_task_input(&mut self, task: &TaskId, raw: &str) {
        if self.service.store().find(task).is_none() {
            self.error("The task to edit no longer exists");
            return;
        }
        match parse_task_editor_output(raw) {
            Ok(Some(draft)) => match self.service.update_task(task, &draft) {
                Ok(true) => {
                    self.rebuild_visibility(Some(task));
                    self.info("Task updated");
                }
                Ok(false) => self.info("No changes"),
                Err(err) => self.error(format!("Task not saved: {err}")),
            },
            Ok(None) => self.info("Edit cancelled"),
            Err(msg) => self.error(msg),
        }
    }

    pub(in crate::tui) fn complete_selected_task(&mut self) {
        let Some((id, completed)) = self.selected_task().map(|task| (task.id.clone(), task.completed)) else {
            self.error("No task selected");
            return;
        };
        if completed {
            self.info("Task is already completed");
            return;
        }
        if self.service.complete_task(&id) {
            self.rebuild_visibility(Some(&id));
            self.info("Task marked as completed");
        }
    }
}
