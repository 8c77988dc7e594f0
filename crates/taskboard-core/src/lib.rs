//! Domain types, store reducer and view projection for taskboard.

/// Time sources used by the projector.
pub mod clock;
/// View filters.
pub mod filter;
/// Identifier types.
pub mod id;
/// Read-side projection of the store.
pub mod projector;
/// Store state and the reducer that mutates it.
pub mod store;
/// Task records.
pub mod task;
/// Title search.
pub mod text_matcher;

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{FilterParseError, TaskFilter};
pub use id::TaskId;
pub use projector::visible_tasks;
pub use store::{StoreState, TaskAction};
pub use task::{DueDate, DueDateError, Task};
pub use text_matcher::TextMatcher;
