//! Application layer logic for taskboard.
//!
//! This crate owns the store container, the caller-side validation performed
//! before dispatching mutations, and helpers shared by the CLI and the TUI.

/// View overrides parsed from user-facing strings.
pub mod filter_util;
pub mod replay;
/// Draft validation and task mutations.
pub mod service;
/// Store container.
pub mod store;

// Re-exports for convenience
pub use filter_util::{FilterBuildError, ViewQuery, ViewQueryBuilder, normalize_timestamp, parse_timestamp};
pub use replay::{ReplayError, parse_script, replay};
pub use service::{DraftError, IdGenerator, TaskDraft, TaskService, UuidGenerator, ValidDraft};
pub use store::TaskStore;
