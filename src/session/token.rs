//! Session token type.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque identifier for a browser session.
///
/// Tokens are random UUIDs so that one client cannot guess another's
/// session from its own cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Create a new random token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_simple())
    }
}

impl FromStr for SessionToken {
    type Err = crate::error::TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .map(SessionToken)
            .map_err(|_| crate::error::TodoError::SessionNotFound(s.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uniqueness() {
        let mut tokens = HashSet::new();
        for _ in 0..1_000 {
            assert!(tokens.insert(SessionToken::new()));
        }
    }

    #[test]
    fn test_display_is_cookie_safe() {
        let token = SessionToken::new().to_string();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_roundtrip() {
        let original = SessionToken::new();
        let parsed: SessionToken = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<SessionToken>().is_err());
        assert!("not-a-token".parse::<SessionToken>().is_err());
        assert!("sess-000000ff".parse::<SessionToken>().is_err());
    }
}
