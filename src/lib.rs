//! # todo-lists
//!
//! Session-backed, multi-list todo manager served over HTTP.
//!
//! Every browser session gets its own ordered collection of named lists,
//! each holding an ordered collection of items. State lives in memory for
//! the lifetime of the process; nothing is persisted.
//!
//! ## Features
//!
//! - **Stable identifiers**: deleting a list or item never renumbers its siblings
//! - **Flash messages**: one-shot error/success notices on the next page
//! - **Display ordering**: least complete lists first, open items before done ones
//!
//! ## Quick Start
//!
//! ```
//! use todo_lists::ListManager;
//!
//! let mut lists = ListManager::new();
//! let groceries = lists.create_list("Groceries")?;
//! let milk = lists.add_item(groceries, "Milk")?;
//! lists.toggle_item(groceries, milk)?;
//!
//! let list = lists.get_list(groceries)?;
//! assert_eq!(list.progress().to_string(), "1/1");
//! assert!(list.completion_state().is_complete());
//! # Ok::<(), todo_lists::TodoError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod todo;

// Re-export commonly used types
pub use error::{NameKind, Result, TodoError};
pub use session::{Flash, Session, SessionStore, SessionToken};
pub use todo::{
    sort_items_for_display, sort_lists_for_display, CompletionState, ItemId, ListId, ListManager,
    Progress, TodoItem, TodoList,
};
