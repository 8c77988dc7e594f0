//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside the selected list entry.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Marker shown after completed tasks.
pub const COMPLETED_MARKER: &str = "✓";
/// Marker shown after overdue tasks.
pub const OVERDUE_MARKER: &str = "!";
/// Longest title rendered in the task list before truncation.
pub const TASK_LIST_TITLE_MAX_CHARS: usize = 60;
/// Width percentage for the filter picker popup before clamping.
pub const FILTER_PICKER_WIDTH_PERCENT: u16 = 30;
/// Minimum width for the filter picker popup.
pub const FILTER_PICKER_MIN_WIDTH: u16 = 24;
/// Height of the filter picker popup (four entries plus borders).
pub const FILTER_PICKER_HEIGHT: u16 = 6;
/// Width percentage for the delete confirmation popup before clamping.
pub const CONFIRM_WIDTH_PERCENT: u16 = 50;
/// Minimum width for the delete confirmation popup.
pub const CONFIRM_MIN_WIDTH: u16 = 44;
/// Height of the delete confirmation popup.
pub const CONFIRM_HEIGHT: u16 = 5;
/// Width/height percentage for the task details popup.
pub const DETAILS_POPUP_PERCENT: u16 = 70;
/// Minimum width for the task details popup.
pub const DETAILS_MIN_WIDTH: u16 = 40;
/// Minimum height for the task details popup.
pub const DETAILS_MIN_HEIGHT: u16 = 10;
