//! Keybindings configuration for the dashboard.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Top-level configuration for taskboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TUI configuration.
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    pub keybindings: KeyBindingsConfig,
}

/// Keybindings for every view of the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Keybindings for the task list.
    pub task_list: TaskListKeyBindings,
    /// Keybindings for the filter selector popup.
    pub filter_picker: FilterPickerKeyBindings,
    /// Keybindings for the delete confirmation dialog.
    pub confirm_delete: ConfirmDeleteKeyBindings,
    /// Keybindings for the task details popup.
    pub details_viewer: DetailsViewerKeyBindings,
}

/// Keybindings for the task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move down in the list.
    pub down: Vec<String>,
    /// Move up in the list.
    pub up: Vec<String>,
    /// Focus the search input.
    pub focus_search: Vec<String>,
    /// Create a new task.
    pub create_task: Vec<String>,
    /// Edit the selected task.
    pub edit_task: Vec<String>,
    /// Mark the selected task as completed.
    pub complete_task: Vec<String>,
    /// Delete the selected task (asks for confirmation).
    pub delete_task: Vec<String>,
    /// Open the filter selector.
    pub open_filter_picker: Vec<String>,
    /// Show every attribute of the selected task.
    pub open_details: Vec<String>,
}

/// Keybindings for the filter selector popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPickerKeyBindings {
    /// Close without changing the filter.
    pub close: Vec<String>,
    /// Move down.
    pub down: Vec<String>,
    /// Move up.
    pub up: Vec<String>,
    /// Apply the highlighted filter.
    pub select: Vec<String>,
}

/// Keybindings for the delete confirmation dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmDeleteKeyBindings {
    /// Delete the task.
    pub confirm: Vec<String>,
    /// Keep the task.
    pub cancel: Vec<String>,
}

/// Keybindings for the task details popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsViewerKeyBindings {
    /// Close the popup.
    pub close: Vec<String>,
}

impl Default for TaskListKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Esc"],
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            focus_search: vec_of_strings!["/"],
            create_task: vec_of_strings!["n", "a"],
            edit_task: vec_of_strings!["e"],
            complete_task: vec_of_strings!["c", "Space"],
            delete_task: vec_of_strings!["d", "Delete"],
            open_filter_picker: vec_of_strings!["f"],
            open_details: vec_of_strings!["Enter", "v"],
        }
    }
}

impl Default for FilterPickerKeyBindings {
    fn default() -> Self {
        Self {
            close: vec_of_strings!["q", "Esc"],
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            select: vec_of_strings!["Enter"],
        }
    }
}

impl Default for ConfirmDeleteKeyBindings {
    fn default() -> Self {
        Self {
            confirm: vec_of_strings!["y", "Enter"],
            cancel: vec_of_strings!["n", "q", "Esc"],
        }
    }
}

impl Default for DetailsViewerKeyBindings {
    fn default() -> Self {
        Self {
            close: vec_of_strings!["q", "Esc", "Enter"],
        }
    }
}

/// Returns the default configuration file path.
///
/// On Linux: `~/.config/taskboard/config.toml`
/// On macOS: `~/Library/Application Support/taskboard/config.toml`
/// On Windows: `%APPDATA%\taskboard\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join("config.toml"))
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let toml_str =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default configuration")?;

    let header = r#"# taskboard configuration
#
# [tui.keybindings]
# Each action can have multiple key bindings.
#
# Supported key formats:
# - Single characters: "j", "k", "/", "1"
# - Special keys: "Enter", "Esc", "Tab", "Backspace", "Delete", "Space"
# - Arrow keys: "Up", "Down", "Left", "Right"
# - Navigation keys: "Home", "End", "PageUp", "PageDown"
# - Modified keys: "Ctrl+d", "Alt+k", "Shift+Up"
#
# Note: When this file exists, ALL default keybindings are replaced.
# Make sure to define all actions you need.

"#;

    Ok(format!("{header}{toml_str}"))
}

/// Load configuration from a TOML file.
///
/// Returns `Ok(None)` when the file (or the platform config directory) does
/// not exist, so callers fall back to the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
///
/// # Errors
/// Returns an error for unknown modifiers or key names.
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    if s.is_empty() {
        bail!("Empty key string");
    }
    // A lone "+" is the plus key, not a separator.
    if s == "+" {
        return Ok(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
    }

    let mut parts: Vec<&str> = s.split('+').collect();
    let key_part = parts.pop().ok_or_else(|| anyhow!("Empty key string"))?;

    let mut modifiers = KeyModifiers::NONE;
    for modifier in parts {
        match modifier {
            "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
            "Alt" => modifiers |= KeyModifiers::ALT,
            "Shift" => modifiers |= KeyModifiers::SHIFT,
            other => bail!("Unknown modifier: {other}"),
        }
    }

    let code = parse_key_code(key_part)?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        "Insert" => Ok(KeyCode::Insert),
        "Space" => Ok(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {other}"),
    }
}

/// View type for keybinding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Task list.
    TaskList,
    /// Filter selector popup.
    FilterPicker,
    /// Delete confirmation dialog.
    ConfirmDelete,
    /// Task details popup.
    DetailsViewer,
}

impl ViewType {
    const ALL: [Self; 4] = [
        Self::TaskList,
        Self::FilterPicker,
        Self::ConfirmDelete,
        Self::DetailsViewer,
    ];

    /// Section name used in the configuration file.
    pub const fn section(self) -> &'static str {
        match self {
            Self::TaskList => "task_list",
            Self::FilterPicker => "filter_picker",
            Self::ConfirmDelete => "confirm_delete",
            Self::DetailsViewer => "details_viewer",
        }
    }
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Close a popup.
    Close,
    /// Focus the search input.
    FocusSearch,
    /// Create a task.
    CreateTask,
    /// Edit the selected task.
    EditTask,
    /// Mark the selected task as completed.
    CompleteTask,
    /// Ask to delete the selected task.
    DeleteTask,
    /// Open the filter selector.
    OpenFilterPicker,
    /// Open the details popup.
    OpenDetails,
    /// Apply the highlighted entry.
    Select,
    /// Accept a confirmation.
    Confirm,
    /// Reject a confirmation.
    Cancel,
}

impl KeyBindingsConfig {
    /// Every `(action name, keys)` pair configured for a view.
    fn bindings(&self, view: ViewType) -> Vec<(&'static str, &[String])> {
        match view {
            ViewType::TaskList => {
                let b = &self.task_list;
                vec![
                    ("quit", &b.quit[..]),
                    ("down", &b.down[..]),
                    ("up", &b.up[..]),
                    ("focus_search", &b.focus_search[..]),
                    ("create_task", &b.create_task[..]),
                    ("edit_task", &b.edit_task[..]),
                    ("complete_task", &b.complete_task[..]),
                    ("delete_task", &b.delete_task[..]),
                    ("open_filter_picker", &b.open_filter_picker[..]),
                    ("open_details", &b.open_details[..]),
                ]
            }
            ViewType::FilterPicker => {
                let b = &self.filter_picker;
                vec![
                    ("close", &b.close[..]),
                    ("down", &b.down[..]),
                    ("up", &b.up[..]),
                    ("select", &b.select[..]),
                ]
            }
            ViewType::ConfirmDelete => {
                let b = &self.confirm_delete;
                vec![("confirm", &b.confirm[..]), ("cancel", &b.cancel[..])]
            }
            ViewType::DetailsViewer => vec![("close", &self.details_viewer.close[..])],
        }
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        use Action as A;
        use ViewType as V;

        match (view, action) {
            (V::TaskList, A::Quit) => &self.task_list.quit,
            (V::TaskList, A::Down) => &self.task_list.down,
            (V::TaskList, A::Up) => &self.task_list.up,
            (V::TaskList, A::FocusSearch) => &self.task_list.focus_search,
            (V::TaskList, A::CreateTask) => &self.task_list.create_task,
            (V::TaskList, A::EditTask) => &self.task_list.edit_task,
            (V::TaskList, A::CompleteTask) => &self.task_list.complete_task,
            (V::TaskList, A::DeleteTask) => &self.task_list.delete_task,
            (V::TaskList, A::OpenFilterPicker) => &self.task_list.open_filter_picker,
            (V::TaskList, A::OpenDetails) => &self.task_list.open_details,

            (V::FilterPicker, A::Close) => &self.filter_picker.close,
            (V::FilterPicker, A::Down) => &self.filter_picker.down,
            (V::FilterPicker, A::Up) => &self.filter_picker.up,
            (V::FilterPicker, A::Select) => &self.filter_picker.select,

            (V::ConfirmDelete, A::Confirm) => &self.confirm_delete.confirm,
            (V::ConfirmDelete, A::Cancel) => &self.confirm_delete.cancel,

            (V::DetailsViewer, A::Close) => &self.details_viewer.close,

            _ => &[],
        }
    }

    /// Check if a key event matches a configured action in a view.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| key_event_matches(&expected, key))
    }

    /// Generate the one-line help shown in the footer for a view.
    pub fn generate_help_text(&self, view: ViewType) -> String {
        match view {
            ViewType::TaskList => {
                let b = &self.task_list;
                format!(
                    "{}:move {}:search {}:new {}:edit {}:complete {}:delete {}:filter {}:details {}:quit",
                    format_key_pair(&b.down, &b.up),
                    format_first_key(&b.focus_search),
                    format_first_key(&b.create_task),
                    format_first_key(&b.edit_task),
                    format_first_key(&b.complete_task),
                    format_first_key(&b.delete_task),
                    format_first_key(&b.open_filter_picker),
                    format_first_key(&b.open_details),
                    format_first_key(&b.quit),
                )
            }
            ViewType::FilterPicker => {
                let b = &self.filter_picker;
                format!(
                    "{}:move {}:apply {}:cancel",
                    format_key_pair(&b.down, &b.up),
                    format_first_key(&b.select),
                    format_first_key(&b.close),
                )
            }
            ViewType::ConfirmDelete => format!(
                "{}:delete {}:cancel",
                format_first_key(&self.confirm_delete.confirm),
                format_first_key(&self.confirm_delete.cancel),
            ),
            ViewType::DetailsViewer => format!("{}:close", format_first_key(&self.details_viewer.close)),
        }
    }
}

// Terminals report uppercase letters with SHIFT set; the character already
// carries the case, so SHIFT is ignored for character keys.
fn key_event_matches(expected: &KeyEvent, actual: &KeyEvent) -> bool {
    if expected.code != actual.code {
        return false;
    }
    if matches!(actual.code, KeyCode::Char(_)) {
        let strip = |m: KeyModifiers| m.difference(KeyModifiers::SHIFT);
        return strip(expected.modifiers) == strip(actual.modifiers);
    }
    expected.modifiers == actual.modifiers
}

fn format_first_key(keys: &[String]) -> String {
    keys.first()
        .map_or_else(|| "?".to_string(), |k| format_key_display(k))
}

fn format_key_pair(down: &[String], up: &[String]) -> String {
    format!("{}/{}", format_first_key(down), format_first_key(up))
}

fn format_key_display(key: &str) -> String {
    match key {
        "Enter" => "↵".to_string(),
        "Backspace" => "BS".to_string(),
        "Delete" => "Del".to_string(),
        "Up" => "↑".to_string(),
        "Down" => "↓".to_string(),
        "Left" => "←".to_string(),
        "Right" => "→".to_string(),
        "PageUp" => "PgUp".to_string(),
        "PageDown" => "PgDn".to_string(),
        other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => other.replace('+', "-"),
        other => other.to_string(),
    }
}

/// Validate the configuration.
///
/// Checks for empty bindings, unparseable key expressions and keys bound to
/// more than one action within the same view.
///
/// # Errors
/// Returns the first problem found.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_keybindings_config(&config.tui.keybindings)
}

/// Validate the keybindings configuration.
///
/// # Errors
/// Returns the first problem found.
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    validate_non_empty_bindings(config)?;
    validate_key_expressions(config)?;
    validate_keybindings(config)?;
    Ok(())
}

fn validate_non_empty_bindings(config: &KeyBindingsConfig) -> Result<()> {
    for view in ViewType::ALL {
        for (action, keys) in config.bindings(view) {
            if keys.is_empty() {
                bail!("{}.{action} must have at least one key binding", view.section());
            }
        }
    }
    Ok(())
}

fn validate_key_expressions(config: &KeyBindingsConfig) -> Result<()> {
    for view in ViewType::ALL {
        for (action, keys) in config.bindings(view) {
            for key in keys {
                parse_key(key)
                    .with_context(|| format!("Invalid key '{key}' in {}.{action}", view.section()))?;
            }
        }
    }
    Ok(())
}

fn validate_keybindings(config: &KeyBindingsConfig) -> Result<()> {
    for view in ViewType::ALL {
        validate_view_keybindings(view.section(), &config.bindings(view))?;
    }
    Ok(())
}

fn validate_view_keybindings(view_name: &str, bindings: &[(&'static str, &[String])]) -> Result<()> {
    let mut key_to_actions: HashMap<&str, Vec<&str>> = HashMap::new();

    for (action, keys) in bindings {
        for key in *keys {
            key_to_actions.entry(key.as_str()).or_default().push(*action);
        }
    }

    for (key, actions) in key_to_actions {
        if actions.len() > 1 {
            bail!("Key '{key}' is bound to multiple actions in {view_name}: {actions:?}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_keybindings() {
        let config = KeyBindingsConfig::default();
        assert_eq!(config.task_list.quit, vec!["q", "Esc"]);
        assert_eq!(config.task_list.focus_search, vec!["/"]);
        assert_eq!(config.task_list.complete_task, vec!["c", "Space"]);
        assert_eq!(config.filter_picker.select, vec!["Enter"]);
        assert_eq!(config.confirm_delete.confirm, vec!["y", "Enter"]);
        assert_eq!(config.details_viewer.close, vec!["q", "Esc", "Enter"]);
    }

    #[test]
    fn default_config_path_points_at_taskboard_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.to_string_lossy().contains("taskboard"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }

    #[test]
    fn parse_simple_and_special_keys() {
        let key = parse_key("j").unwrap();
        assert_eq!(key.code, KeyCode::Char('j'));
        assert_eq!(key.modifiers, KeyModifiers::NONE);

        assert_eq!(parse_key("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key("Esc").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key("/").unwrap().code, KeyCode::Char('/'));
        assert_eq!(parse_key("+").unwrap().code, KeyCode::Char('+'));
    }

    #[test]
    fn parse_modified_key() {
        let key = parse_key("Ctrl+d").unwrap();
        assert_eq!(key.code, KeyCode::Char('d'));
        assert_eq!(key.modifiers, KeyModifiers::CONTROL);

        let key = parse_key("Alt+k").unwrap();
        assert_eq!(key.modifiers, KeyModifiers::ALT);
    }

    #[test]
    fn parse_invalid_key() {
        assert!(parse_key("InvalidKey").is_err());
        assert!(parse_key("").is_err());
        assert!(parse_key("Hyper+j").is_err());
    }

    #[test]
    fn uppercase_bindings_match_shifted_events() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.quit = vec!["Q".to_string()];

        let shifted = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert!(config.matches(ViewType::TaskList, Action::Quit, &shifted));

        let lower = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!config.matches(ViewType::TaskList, Action::Quit, &lower));
    }

    #[test]
    fn matches_respects_view() {
        let config = KeyBindingsConfig::default();
        let y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        assert!(config.matches(ViewType::ConfirmDelete, Action::Confirm, &y));
        assert!(!config.matches(ViewType::TaskList, Action::Confirm, &y));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!config.matches(ViewType::TaskList, Action::CompleteTask, &ctrl_c));
    }

    #[test]
    fn help_text_lists_actions() {
        let config = KeyBindingsConfig::default();
        let help = config.generate_help_text(ViewType::TaskList);
        assert!(help.contains("j/k:move"));
        assert!(help.contains("/:search"));
        assert!(help.contains("d:delete"));
        assert!(help.contains("q:quit"));

        let picker = config.generate_help_text(ViewType::FilterPicker);
        assert!(picker.contains("↵:apply"));
    }

    #[test]
    fn validate_default_config() {
        assert!(validate_keybindings_config(&KeyBindingsConfig::default()).is_ok());
    }

    #[test]
    fn detect_key_conflict_in_same_view() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.quit = vec!["j".to_string()];

        let err = validate_keybindings(&config).unwrap_err().to_string();
        assert!(err.contains("multiple actions"));
        assert!(err.contains("task_list"));
    }

    #[test]
    fn same_key_in_different_views_is_fine() {
        let mut config = KeyBindingsConfig::default();
        config.filter_picker.close = vec!["q".to_string()];
        config.details_viewer.close = vec!["q".to_string()];
        assert!(validate_keybindings(&config).is_ok());
    }

    #[test]
    fn empty_binding_is_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.confirm_delete.cancel = vec![];

        let err = validate_non_empty_bindings(&config).unwrap_err().to_string();
        assert!(err.contains("confirm_delete.cancel"));
    }

    #[test]
    fn invalid_key_expression_is_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.edit_task = vec!["NotAKey".to_string()];

        let err = format!("{:#}", validate_key_expressions(&config).unwrap_err());
        assert!(err.contains("task_list.edit_task"));
    }

    #[test]
    fn load_nonexistent_config() {
        let result = load_config(Some(Path::new("/nonexistent/path/config.toml"))).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_custom_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tui.keybindings.task_list.quit = vec!["x".to_string()];
        file.write_all(toml::to_string(&config).unwrap().as_bytes()).unwrap();

        let loaded = load_config(Some(file.path())).unwrap().unwrap();
        assert_eq!(loaded.tui.keybindings.task_list.quit, vec!["x"]);
        assert!(validate_config(&loaded).is_ok());
    }

    #[test]
    fn load_partial_config_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[tui.keybindings.task_list]\nquit = [\"x\"]\n").unwrap();

        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn generated_default_round_trips() {
        let raw = generate_default_config_toml().unwrap();
        assert!(raw.starts_with("# taskboard configuration"));

        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.tui.keybindings.task_list.open_details, vec!["Enter", "v"]);
        assert!(validate_config(&parsed).is_ok());
    }
}
