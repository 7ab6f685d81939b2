use thiserror::Error;

use crate::constants::limits;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

const INVALID_CHARS: &[char] = &['<', '>', '{', '}'];

/// Checks a required free-text field.
///
/// The minimum applies to the trimmed text, the maximum to the raw input.
pub fn validate_required_string(
    value: &str,
    field_name: &str,
    min_length: usize,
    max_length: usize,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field_name} cannot be empty")));
    }

    if trimmed.chars().count() < min_length {
        return Err(ValidationError::new(format!(
            "{field_name} must be at least {min_length} characters long"
        )));
    }

    if value.chars().count() > max_length {
        return Err(ValidationError::new(format!("{field_name} is too long")));
    }

    if value.contains(INVALID_CHARS) {
        return Err(ValidationError::new(format!(
            "{field_name} contains invalid characters"
        )));
    }

    Ok(())
}

pub fn validate_search_query(query: &str) -> Result<(), ValidationError> {
    validate_required_string(
        query,
        "Search query",
        limits::SEARCH_QUERY_MIN,
        limits::SEARCH_QUERY_MAX,
    )
}

pub fn validate_imdb_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::new("imdbID cannot be empty"));
    }

    let len = id.chars().count();
    if !(limits::IMDB_ID_MIN..=limits::IMDB_ID_MAX).contains(&len) {
        return Err(ValidationError::new("Invalid imdbID format"));
    }

    Ok(())
}
