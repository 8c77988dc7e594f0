//! CLI entry point for taskboard.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt::format::FmtSpan};

use commands::{OutputFormat, ReplayArgs};

mod commands;
mod config;
mod tui;

/// In-memory task dashboard for the terminal.
#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "taskboard: an in-memory task dashboard")]
struct Cli {
    /// Keybindings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Launch the interactive dashboard (default).
    Tui,

    /// Apply a script of store actions and print the resulting view.
    Replay {
        /// Script file (JSON array or JSON Lines), or `-` for stdin.
        input: String,
        /// Filter to project with: all, completed, pending, overdue.
        #[arg(long)]
        filter: Option<String>,
        /// Search term to project with.
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Evaluate overdue tasks at this RFC3339 instant.
        #[arg(long)]
        now: Option<String>,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Destination path (defaults to the platform config directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file without asking.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let Cli { config, cmd } = Cli::parse();
    let cmd = cmd.unwrap_or(Command::Tui);

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    match cmd {
        Command::Tui => {
            let keybindings = config::load_keybindings(config.as_deref())?;
            tui::run(keybindings)
        }
        Command::Replay {
            input,
            filter,
            search,
            json,
            now,
        } => commands::run_replay(&ReplayArgs {
            input,
            filter,
            search,
            format: if json { OutputFormat::Json } else { OutputFormat::Table },
            now,
        }),
        Command::InitConfig { output, force } => {
            config::init_config(output.as_deref().or(config.as_deref()), force)
        }
    }
}

// The dashboard owns the terminal; log lines would corrupt the alternate screen.
const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui)
}

/// INFO unless overridden by `directives`, or by `RUST_LOG` when none are given.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    match directives {
        Some(directives) => builder.parse_lossy(directives),
        None => builder.from_env_lossy(),
    }
}

fn install_tracing() {
    let filter = env_filter(None);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_from(directives: &str) -> EnvFilter {
        env_filter(Some(directives))
    }

    #[test]
    fn log_level_directive_overrides_default() {
        assert_eq!(filter_from("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_from("warn").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn empty_directive_falls_back_to_info() {
        assert_eq!(filter_from("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["taskboard"]);
        assert_eq!(cli.cmd, None);
        assert!(!should_install_tracing(&cli.cmd.unwrap_or(Command::Tui)));
    }

    #[test]
    fn parse_tui_command() {
        let cli = Cli::parse_from(["taskboard", "tui", "--config", "/tmp/keys.toml"]);
        assert_eq!(cli.cmd, Some(Command::Tui));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/keys.toml")));
    }

    #[test]
    fn parse_replay_command() {
        let cli = Cli::parse_from([
            "taskboard",
            "replay",
            "session.json",
            "--filter",
            "overdue",
            "--search",
            "spec",
            "--json",
            "--now",
            "2024-06-01T00:00:00Z",
        ]);

        match cli.cmd {
            Some(Command::Replay {
                input,
                filter,
                search,
                json,
                now,
            }) => {
                assert_eq!(input, "session.json");
                assert_eq!(filter.as_deref(), Some("overdue"));
                assert_eq!(search.as_deref(), Some("spec"));
                assert!(json);
                assert_eq!(now.as_deref(), Some("2024-06-01T00:00:00Z"));
            }
            other => panic!("expected replay command, got {other:?}"),
        }
    }

    #[test]
    fn parse_replay_from_stdin() {
        let cli = Cli::parse_from(["taskboard", "replay", "-"]);
        assert!(matches!(cli.cmd, Some(Command::Replay { ref input, json: false, .. }) if input == "-"));
        assert!(should_install_tracing(&Command::InitConfig {
            output: None,
            force: false
        }));
    }

    #[test]
    fn parse_init_config_command() {
        let cli = Cli::parse_from(["taskboard", "init-config", "--output", "/tmp/taskboard.toml", "--force"]);
        assert_eq!(
            cli.cmd,
            Some(Command::InitConfig {
                output: Some(PathBuf::from("/tmp/taskboard.toml")),
                force: true,
            })
        );
    }
}
