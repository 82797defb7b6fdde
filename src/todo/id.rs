//! List and item identifier types.

use std::fmt;
use std::str::FromStr;

use crate::error::{NameKind, TodoError};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Get the raw u64 value.
            pub fn as_u64(&self) -> u64 {
                self.0
            }

            /// Create an identifier from a raw u64 value.
            pub fn from_raw(value: u64) -> Self {
                Self(value)
            }

            /// Return this identifier and advance the counter past it.
            pub(crate) fn bump(counter: &mut u64) -> Self {
                let id = Self(*counter);
                *counter += 1;
                id
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TodoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // u64 parsing alone would accept a leading '+'.
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(TodoError::NotFound($kind));
                }
                s.parse::<u64>()
                    .map($name)
                    .map_err(|_| TodoError::NotFound($kind))
            }
        }
    };
}

define_id!(
    /// Identifier of a list within one session.
    ///
    /// Allocated from a per-session counter, so deleting a list never
    /// shifts the identifiers of the lists after it.
    ListId,
    NameKind::List
);

define_id!(
    /// Identifier of an item within its parent list.
    ItemId,
    NameKind::Item
);
