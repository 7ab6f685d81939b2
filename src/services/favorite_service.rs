//! Domain service for a user's favorite movies.

use crate::domain::UserId;
use crate::domain::validation::ValidationError;
use crate::models::{Favorite, NewFavorite};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl FavoriteError {
    pub(crate) fn already_exists() -> Self {
        Self::Conflict("Movie already in favorites".to_string())
    }
}

impl From<ValidationError> for FavoriteError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

impl From<sea_orm::DbErr> for FavoriteError {
    fn from(err: sea_orm::DbErr) -> Self {
        if matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ) {
            return Self::already_exists();
        }
        Self::Database(err.to_string())
    }
}

/// Domain service trait for favorites. Every operation is scoped to one user.
#[async_trait::async_trait]
pub trait FavoriteService: Send + Sync {
    /// Saves a movie for `user`.
    ///
    /// # Errors
    ///
    /// - [`FavoriteError::Validation`] for a malformed item
    /// - [`FavoriteError::Conflict`] if the user already saved this movie,
    ///   including when a concurrent add wins the race
    async fn add(&self, user: &UserId, item: NewFavorite) -> Result<Favorite, FavoriteError>;

    /// Returns [`FavoriteError::NotFound`] if nothing matched.
    async fn remove(&self, user: &UserId, imdb_id: &str) -> Result<(), FavoriteError>;

    /// Newest first.
    async fn list(&self, user: &UserId) -> Result<Vec<Favorite>, FavoriteError>;

    async fn get_one(&self, user: &UserId, imdb_id: &str) -> Result<Favorite, FavoriteError>;

    async fn is_favorite(&self, user: &UserId, imdb_id: &str) -> Result<bool, FavoriteError>;
}
