//! Non-interactive commands.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use taskboard_app::{TaskStore, ViewQuery, ViewQueryBuilder, parse_script, replay};
use taskboard_core::{Clock, Task, visible_tasks};
use time::OffsetDateTime;
use tracing::info;

/// Output format for `replay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pipe-separated table.
    #[default]
    Table,
    /// Pretty JSON array of tasks.
    Json,
}

/// Options collected from the `replay` subcommand.
#[derive(Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Script path, or `-` for stdin.
    pub input: String,
    /// Filter token overriding the final state.
    pub filter: Option<String>,
    /// Search term overriding the final state.
    pub search: Option<String>,
    /// Output format.
    pub format: OutputFormat,
    /// RFC3339 instant used for overdue checks.
    pub now: Option<String>,
}

/// Run `replay` against stdin/stdout.
///
/// # Errors
/// Returns an error if the script cannot be read or decoded, or an override is invalid.
pub fn run_replay(args: &ReplayArgs) -> Result<()> {
    let raw = read_input(&args.input)?;
    let mut stdout = io::stdout().lock();
    execute_replay(&raw, args, &mut TaskStore::new(), &mut stdout)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read script from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(Path::new(input)).with_context(|| format!("Failed to read script: {input}"))
}

fn execute_replay<C: Clock>(
    raw: &str,
    args: &ReplayArgs,
    store: &mut TaskStore<C>,
    out: &mut impl Write,
) -> Result<()> {
    let query = ViewQueryBuilder::new()
        .with_filter(args.filter.as_deref())?
        .with_search_term(args.search.clone())
        .with_now(args.now.as_deref())?
        .build();

    let actions = parse_script(raw).context("Failed to decode script")?;
    let applied = replay(store, actions);
    info!(applied, tasks = store.tasks().len(), "script replayed");

    let now = query.now_or(store.now());
    let tasks = project(store, &query, now);
    match args.format {
        OutputFormat::Table => render_task_table(out, &tasks, now)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&tasks)?)?,
    }
    Ok(())
}

fn project<'a, C: Clock>(store: &'a TaskStore<C>, query: &ViewQuery, now: OffsetDateTime) -> Vec<&'a Task> {
    let filter = query.filter_or(store.filter());
    let search_term = query.search_term_or(store.search_term());
    visible_tasks(store.tasks(), filter, search_term, now).collect()
}

fn render_task_table(out: &mut impl Write, tasks: &[&Task], now: OffsetDateTime) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks found");
    }

    writeln!(out, "ID | Title | Due | Status")?;
    writeln!(out, "-- | ----- | --- | ------")?;
    for task in tasks {
        let mut status = if task.completed { "completed" } else { "pending" }.to_owned();
        if task.is_overdue(now) {
            status.push_str(", overdue");
        }
        writeln!(out, "{} | {} | {} | {}", task.id, task.title, task.due_date, status)?;
    }
    Ok(())
}
