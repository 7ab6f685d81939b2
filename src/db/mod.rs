use crate::domain::UserId;
use crate::models::{Favorite, Movie, NewFavorite};
use anyhow::Result;
use chrono::Duration;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use std::path::Path;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::cache::CachedSearch;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `sqlite::memory:` would be a separate database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(std::time::Duration::from_secs(10))
            .acquire_timeout(std::time::Duration::from_secs(10))
            .idle_timeout(std::time::Duration::from_secs(300))
            .max_lifetime(std::time::Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    // Search cache

    pub async fn get_cached_search(&self, key: &str) -> Result<Option<Vec<Movie>>> {
        self.cache_repo().get(key).await
    }

    pub async fn get_cached_search_entry(&self, key: &str) -> Result<Option<CachedSearch>> {
        self.cache_repo().get_entry(key).await
    }

    pub async fn cache_search_results(
        &self,
        key: &str,
        results: &[Movie],
        ttl: Duration,
    ) -> Result<()> {
        self.cache_repo().set(key, results, ttl).await
    }

    pub async fn clear_search_cache(&self) -> Result<u64> {
        self.cache_repo().clear().await
    }

    // Favorites

    pub async fn insert_favorite(
        &self,
        user: &UserId,
        item: &NewFavorite,
    ) -> Result<Favorite, DbErr> {
        self.favorite_repo().insert(user, item).await
    }

    pub async fn get_favorite(
        &self,
        user: &UserId,
        imdb_id: &str,
    ) -> Result<Option<Favorite>, DbErr> {
        self.favorite_repo().get(user, imdb_id).await
    }

    pub async fn favorite_exists(&self, user: &UserId, imdb_id: &str) -> Result<bool, DbErr> {
        self.favorite_repo().exists(user, imdb_id).await
    }

    pub async fn list_favorites(&self, user: &UserId) -> Result<Vec<Favorite>, DbErr> {
        self.favorite_repo().list_for_user(user).await
    }

    pub async fn remove_favorite(&self, user: &UserId, imdb_id: &str) -> Result<bool, DbErr> {
        self.favorite_repo().remove(user, imdb_id).await
    }
}
