//! Error types for todo-lists.

use std::fmt;

use thiserror::Error;

/// Which kind of entity a name or lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    List,
    Item,
}

impl NameKind {
    /// Lowercase noun used inside sentences.
    pub fn noun(&self) -> &'static str {
        match self {
            NameKind::List => "list",
            NameKind::Item => "item",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::List => write!(f, "List"),
            NameKind::Item => write!(f, "Item"),
        }
    }
}

/// Main error type for todo-lists operations.
///
/// The first three variants are user-facing and always recovered by the
/// HTTP layer as a flash message. The rest indicate an internal fault.
#[derive(Error, Debug)]
pub enum TodoError {
    /// Name length outside of the accepted bounds.
    #[error("{0} name must be between 1 and 100 characters.")]
    InvalidName(NameKind),

    /// Name collides with a sibling.
    #[error("{0} name must be unique.")]
    DuplicateName(NameKind),

    /// Identifier does not refer to an existing entity.
    #[error("Unable to locate that {}!", .0.noun())]
    NotFound(NameKind),

    /// Session with the given token was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    /// Whether this error should be shown to the user and recovered from.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TodoError::InvalidName(_) | TodoError::DuplicateName(_) | TodoError::NotFound(_)
        )
    }
}

/// Convenience Result type for todo-lists operations.
pub type Result<T> = std::result::Result<T, TodoError>;
