//! Todo list domain.
//!
//! Lists and items are addressed by stable identifiers that are never
//! reused within a session, while display order follows insertion order.

mod id;
mod list;
mod manager;
mod validation;

pub use id::{ItemId, ListId};
pub use list::{sort_items_for_display, CompletionState, Progress, TodoItem, TodoList};
pub use manager::{sort_lists_for_display, ListManager};
pub use validation::{validate_name, MAX_NAME_LEN, MIN_NAME_LEN};
