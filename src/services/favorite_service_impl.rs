//! `SeaORM` implementation of the `FavoriteService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::constants::limits;
use crate::db::Store;
use crate::domain::UserId;
use crate::domain::validation::{validate_imdb_id, validate_required_string};
use crate::models::{Favorite, NewFavorite};
use crate::services::favorite_service::{FavoriteError, FavoriteService};

pub struct SeaOrmFavoriteService {
    store: Store,
}

impl SeaOrmFavoriteService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate(item: &NewFavorite) -> Result<(), FavoriteError> {
        validate_imdb_id(&item.imdb_id)?;
        validate_required_string(&item.title, "title", 1, limits::TITLE_MAX)?;
        validate_required_string(&item.year, "year", 1, limits::YEAR_MAX)?;
        Ok(())
    }
}

#[async_trait]
impl FavoriteService for SeaOrmFavoriteService {
    async fn add(&self, user: &UserId, item: NewFavorite) -> Result<Favorite, FavoriteError> {
        Self::validate(&item)?;

        // Fast path only; the unique index decides races (see `From<DbErr>`).
        if self.store.favorite_exists(user, &item.imdb_id).await? {
            return Err(FavoriteError::already_exists());
        }

        let favorite = self.store.insert_favorite(user, &item).await?;
        Ok(favorite)
    }

    async fn remove(&self, user: &UserId, imdb_id: &str) -> Result<(), FavoriteError> {
        if !self.store.remove_favorite(user, imdb_id).await? {
            return Err(FavoriteError::NotFound("Favorite not found".to_string()));
        }
        Ok(())
    }

    async fn list(&self, user: &UserId) -> Result<Vec<Favorite>, FavoriteError> {
        let favorites = self.store.list_favorites(user).await?;
        info!("Found {} favorites for user {}", favorites.len(), user);
        Ok(favorites)
    }

    async fn get_one(&self, user: &UserId, imdb_id: &str) -> Result<Favorite, FavoriteError> {
        self.store
            .get_favorite(user, imdb_id)
            .await?
            .ok_or_else(|| FavoriteError::NotFound(format!("Favorite with ID {imdb_id} not found")))
    }

    async fn is_favorite(&self, user: &UserId, imdb_id: &str) -> Result<bool, FavoriteError> {
        Ok(self.store.favorite_exists(user, imdb_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmFavoriteService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmFavoriteService::new(store)
    }

    fn item(id: &str) -> NewFavorite {
        NewFavorite {
            imdb_id: id.to_string(),
            title: "Batman Begins".to_string(),
            year: "2005".to_string(),
            poster: None,
        }
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let service = service().await;
        let user = UserId::new("user-123");

        let added = service.add(&user, item("tt0372784")).await.unwrap();
        assert_eq!(added.user_id, user);
        assert_eq!(added.imdb_id, "tt0372784");
        assert_eq!(added.movie_data["title"], "Batman Begins");

        let fetched = service.get_one(&user, "tt0372784").await.unwrap();
        assert_eq!(fetched, added);
        assert!(service.is_favorite(&user, "tt0372784").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_add_conflicts_and_leaves_store_unchanged() {
        let service = service().await;
        let user = UserId::new("user-123");

        let first = service.add(&user, item("tt1")).await.unwrap();

        let mut again = item("tt1");
        again.title = "Other title".to_string();
        let err = service.add(&user, again).await.unwrap_err();
        assert!(matches!(err, FavoriteError::Conflict(_)));

        let all = service.list(&user).await.unwrap();
        assert_eq!(all, vec![first]);
    }

    #[tokio::test]
    async fn test_unique_index_violation_is_conflict() {
        let service = service().await;
        let user = UserId::new("user-123");

        // Bypasses the existence check, as a concurrent add would.
        service.store.insert_favorite(&user, &item("tt1")).await.unwrap();
        let err = service
            .store
            .insert_favorite(&user, &item("tt1"))
            .await
            .unwrap_err();

        match FavoriteError::from(err) {
            FavoriteError::Conflict(msg) => assert_eq!(msg, "Movie already in favorites"),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(service.list(&user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_movie_for_different_users() {
        let service = service().await;

        service.add(&UserId::new("a"), item("tt1")).await.unwrap();
        service.add(&UserId::new("b"), item("tt1")).await.unwrap();

        assert_eq!(service.list(&UserId::new("a")).await.unwrap().len(), 1);
        assert_eq!(service.list(&UserId::new("b")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let service = service().await;
        let user = UserId::new("user-123");
        service.add(&user, item("tt1")).await.unwrap();

        let err = service.remove(&user, "tt404").await.unwrap_err();
        assert!(matches!(err, FavoriteError::NotFound(_)));
        assert_eq!(service.list(&user).await.unwrap().len(), 1);

        service.remove(&user, "tt1").await.unwrap();
        assert!(!service.is_favorite(&user, "tt1").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = service().await;
        let err = service
            .get_one(&UserId::new("user-123"), "tt404")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Favorite with ID tt404 not found");
    }

    #[tokio::test]
    async fn test_invalid_item_is_rejected() {
        let service = service().await;
        let user = UserId::new("user-123");

        let mut bad = item("t");
        assert!(matches!(
            service.add(&user, bad.clone()).await,
            Err(FavoriteError::Validation(_))
        ));

        bad.imdb_id = "tt1".to_string();
        bad.title = "   ".to_string();
        assert!(matches!(
            service.add(&user, bad).await,
            Err(FavoriteError::Validation(_))
        ));

        assert!(service.list(&user).await.unwrap().is_empty());
    }
}
