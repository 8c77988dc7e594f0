use std::env;
use std::fs;
use std::io::{Stdout, Write};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tempfile::NamedTempFile;

const EDITOR_VARIABLES: [&str; 3] = ["TASKBOARD_EDITOR", "VISUAL", "EDITOR"];
const FALLBACK_EDITOR: &str = "vi";

pub(super) fn with_terminal_suspended<F, T>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    f: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    suspend_terminal(terminal)?;
    let result = f();
    resume_terminal(terminal)?;
    result
}

fn suspend_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    terminal.flush()?;
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("failed to leave alternate screen")?;
    Ok(())
}

fn resume_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    execute!(terminal.backend_mut(), EnterAlternateScreen).context("failed to re-enter alternate screen")?;
    enable_raw_mode().context("failed to enable raw mode")?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    terminal.flush()?;
    Ok(())
}

/// First non-blank editor variable, falling back to `vi`.
fn resolve_editor_command_with(lookup: impl Fn(&str) -> Option<String>) -> String {
    EDITOR_VARIABLES
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_owned())
}

fn resolve_editor_command() -> String {
    resolve_editor_command_with(|name| env::var(name).ok())
}

/// Split an editor command line into program and arguments.
fn split_editor_command(editor: &str) -> Result<(String, Vec<String>)> {
    let mut parts = shell_words::split(editor).map_err(|err| anyhow!("cannot parse editor command: {err}"))?;
    if parts.is_empty() {
        parts.push(editor.to_owned());
    }
    let program = parts.remove(0);
    Ok((program, parts))
}

pub(super) fn launch_editor(initial: &str) -> Result<String> {
    let mut tempfile = NamedTempFile::new().context("failed to create temporary file")?;
    tempfile
        .write_all(initial.as_bytes())
        .context("failed to write temporary file")?;
    tempfile.flush().context("failed to flush temporary file")?;

    let (program, args) = split_editor_command(&resolve_editor_command())?;
    let status = Command::new(&program)
        .args(&args)
        .arg(tempfile.path())
        .status()
        .with_context(|| format!("failed to launch editor {program}"))?;
    if !status.success() {
        return Err(anyhow!("editor exited abnormally ({status})"));
    }

    fs::read_to_string(tempfile.path()).context("failed to read the edited file")
}
