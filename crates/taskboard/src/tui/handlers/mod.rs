use std::io::Stdout;

use anyhow::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use taskboard_app::IdGenerator;
use taskboard_core::Clock;

use super::view::{Ui, UiAction};

pub(super) mod delete;
pub(super) mod edit;
pub(super) mod filter;
pub(super) mod navigation;
pub(super) mod search;

pub(super) fn handle_ui_action<C: Clock, G: IdGenerator>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui<C, G>,
    action: UiAction,
) -> Result<()> {
    edit::handle_ui_action(terminal, ui, action)
}
