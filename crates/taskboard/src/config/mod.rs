//! Configuration module for taskboard.

use anyhow::{Context, Result, anyhow};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

/// Load keybindings from `path` (or the default location), falling back to
/// the built-in defaults when no file exists.
///
/// # Errors
/// Returns an error if the file exists but is unreadable or invalid.
pub fn load_keybindings(path: Option<&Path>) -> Result<KeyBindingsConfig> {
    match keybindings::load_config(path)? {
        Some(config) => {
            keybindings::validate_config(&config).context("Invalid keybindings configuration")?;
            Ok(config.tui.keybindings)
        }
        None => Ok(KeyBindingsConfig::default()),
    }
}

/// Write the default configuration file.
///
/// # Errors
/// Returns an error if the path cannot be determined or written.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<()> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => keybindings::default_config_path()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write_default_config(&output_path, force, &mut stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Returns `true` when the file was written.
fn write_default_config(
    path: &Path,
    force: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    if path.exists() && !force && !confirm_overwrite(path, input, out)? {
        writeln!(out, "Aborted.")?;
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = keybindings::generate_default_config_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    writeln!(out, "✓ Wrote configuration file: {}", path.display())?;
    writeln!(out, "Edit it to customize keybindings, then restart `taskboard tui`.")?;
    Ok(true)
}

fn confirm_overwrite(path: &Path, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "File already exists: {}\nOverwrite? [y/N]: ", path.display())?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
