//! HTTP layer for todo-lists.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /` - Redirect to `/lists`
//! - `GET /lists` - All lists, least complete first
//! - `GET /lists/new` - New list form
//! - `POST /lists` - Create a list (`list_name`)
//! - `GET /lists/{id}` - One list with its items
//! - `GET /lists/{id}/edit` - Rename form
//! - `POST /lists/{id}/edit` - Rename a list (`list_name`)
//! - `POST /lists/{id}/delete` - Delete a list
//! - `POST /lists/{id}/todos` - Add an item (`todo`)
//! - `POST /lists/{id}/remove/{index}` - Remove an item
//! - `POST /lists/{id}/todos/{index}` - Toggle an item
//! - `POST /lists/{id}/finish` - Complete every item
//!
//! ## Example
//!
//! ```no_run
//! use todo_lists::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> todo_lists::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 4567);
//!     serve(config).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod session_layer;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use session_layer::DEFAULT_COOKIE_NAME;
pub use types::{ListNameForm, TodoForm};
