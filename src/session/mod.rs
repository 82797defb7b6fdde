//! Session management module.
//!
//! Each browser session owns its own set of todo lists plus one-shot flash
//! messages. Sessions live in memory only and are addressed by a random
//! token carried in a cookie.

mod flash;
mod store;
mod token;

pub use flash::Flash;
pub use store::{Session, SessionStore, DEFAULT_IDLE_TIMEOUT};
pub use token::SessionToken;
