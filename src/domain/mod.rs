//! Domain primitives shared by the search and favorites services.
//!
//! Identity is modelled with newtypes so a user id can never be passed where a
//! catalog id is expected.

pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the user owning a favorites list.
///
/// The services never interpret it; whatever resolves the caller's identity
/// at the HTTP edge decides its shape.
///
/// # Examples
///
/// ```rust
/// use screen_search::domain::UserId;
///
/// let user = UserId::new("user-123");
/// assert_eq!(user.as_str(), "user-123");
/// assert_eq!(user.to_string(), "user-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Cache key for a search query: namespace plus the lower-cased, trimmed text.
///
/// # Examples
///
/// ```rust
/// use screen_search::domain::search_cache_key;
///
/// assert_eq!(search_cache_key("movies:search", "  Batman "), "movies:search:batman");
/// ```
#[must_use]
pub fn search_cache_key(namespace: &str, query: &str) -> String {
    format!("{}:{}", namespace, query.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrips_as_plain_string() {
        let user = UserId::new("user-123");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, "\"user-123\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_search_cache_key_normalizes_case_and_whitespace() {
        assert_eq!(
            search_cache_key("movies:search", "The Matrix"),
            "movies:search:the matrix"
        );
        assert_eq!(
            search_cache_key("movies:search", "\tBATMAN  \n"),
            "movies:search:batman"
        );
    }
}
