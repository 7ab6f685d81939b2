//! Domain service for movie search.
//!
//! Searches go through a cache-aside layer in front of the external catalog.

use crate::domain::validation::ValidationError;
use crate::models::Movie;
use thiserror::Error;

/// Errors surfaced by a movie search.
///
/// A query the catalog has no match for is not an error; it yields an empty
/// list.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("{0}")]
    Validation(String),

    /// The catalog rejected the request itself.
    #[error("{0}")]
    BadRequest(String),

    /// The catalog refused our API key.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ValidationError> for MovieError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// Domain service trait for movie search.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Searches the catalog for `query`, serving from cache when possible.
    ///
    /// # Errors
    ///
    /// - [`MovieError::Validation`] if the query is empty, shorter than 2 or
    ///   longer than 100 characters, or contains `<>{}`
    /// - the upstream variants when the catalog call fails and nothing is cached
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, MovieError>;
}
