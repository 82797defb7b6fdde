//! Name validation shared by lists and items.

use crate::error::{NameKind, TodoError};
use crate::Result;

/// Minimum name length in characters.
pub const MIN_NAME_LEN: usize = 1;

/// Maximum name length in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Trim a raw name and check its length.
///
/// Length is counted in characters, not bytes. Returns the trimmed name.
pub fn validate_name(kind: NameKind, raw: &str) -> Result<String> {
    let name = raw.trim();
    let len = name.chars().count();

    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(TodoError::InvalidName(kind));
    }

    Ok(name.to_string())
}
