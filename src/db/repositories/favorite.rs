use crate::domain::UserId;
use crate::entities::{favorites, prelude::*};
use crate::models::{Favorite, NewFavorite};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::info;

use super::cache::timestamp;

/// Repository for a user's favorite movies.
///
/// Errors are returned as raw `DbErr` so callers can tell a unique-index
/// violation apart from other failures.
pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: favorites::Model) -> Favorite {
        let movie_data =
            serde_json::from_str(&m.movie_data_json).unwrap_or(serde_json::Value::Null);

        Favorite {
            id: m.id,
            user_id: UserId::new(m.user_id),
            imdb_id: m.imdb_id,
            title: m.title,
            year: m.year,
            poster: m.poster,
            movie_data,
            created_at: m.created_at,
        }
    }

    fn scoped(user: &UserId, imdb_id: &str) -> sea_orm::Select<Favorites> {
        Favorites::find()
            .filter(favorites::Column::UserId.eq(user.as_str()))
            .filter(favorites::Column::ImdbId.eq(imdb_id))
    }

    pub async fn insert(&self, user: &UserId, item: &NewFavorite) -> Result<Favorite, DbErr> {
        let active_model = favorites::ActiveModel {
            user_id: Set(user.as_str().to_string()),
            imdb_id: Set(item.imdb_id.clone()),
            title: Set(item.title.clone()),
            year: Set(item.year.clone()),
            poster: Set(item.poster.clone()),
            movie_data_json: Set(item.movie_data().to_string()),
            created_at: Set(timestamp(Utc::now())),
            ..Default::default()
        };

        let model = Favorites::insert(active_model)
            .exec_with_returning(&self.conn)
            .await?;

        info!(
            "Movie {} added to favorites for user {}",
            model.imdb_id, model.user_id
        );
        Ok(Self::map_model(model))
    }

    pub async fn get(&self, user: &UserId, imdb_id: &str) -> Result<Option<Favorite>, DbErr> {
        let row = Self::scoped(user, imdb_id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn exists(&self, user: &UserId, imdb_id: &str) -> Result<bool, DbErr> {
        let count = Self::scoped(user, imdb_id).count(&self.conn).await?;
        Ok(count > 0)
    }

    /// Newest first.
    pub async fn list_for_user(&self, user: &UserId) -> Result<Vec<Favorite>, DbErr> {
        let rows = Favorites::find()
            .filter(favorites::Column::UserId.eq(user.as_str()))
            .order_by_desc(favorites::Column::CreatedAt)
            .order_by_desc(favorites::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Returns whether a row was deleted.
    pub async fn remove(&self, user: &UserId, imdb_id: &str) -> Result<bool, DbErr> {
        let result = Favorites::delete_many()
            .filter(favorites::Column::UserId.eq(user.as_str()))
            .filter(favorites::Column::ImdbId.eq(imdb_id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected > 0 {
            info!("Movie {} removed from favorites for user {}", imdb_id, user);
        }
        Ok(result.rows_affected > 0)
    }
}
