use crate::entities::{prelude::*, search_cache};
use crate::models::Movie;
use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::warn;

/// Timestamps are stored fixed-width so that string comparison is chronological.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns the live entry for `key`, purging expired rows on the way.
    pub async fn get_entry(&self, key: &str) -> Result<Option<CachedSearch>> {
        let now = timestamp(Utc::now());

        // The row we want is filtered by expiry anyway.
        if let Err(e) = SearchCache::delete_many()
            .filter(search_cache::Column::ExpiresAt.lte(now.as_str()))
            .exec(&self.conn)
            .await
        {
            warn!("Failed to purge expired search cache rows: {}", e);
        }

        let entry = SearchCache::find()
            .filter(search_cache::Column::Query.eq(key))
            .filter(search_cache::Column::ExpiresAt.gt(now.as_str()))
            .one(&self.conn)
            .await?;

        let Some(e) = entry else {
            return Ok(None);
        };

        let results: Vec<Movie> = serde_json::from_str(&e.results_json)?;
        Ok(Some(CachedSearch {
            results,
            created_at: e.created_at,
            expires_at: e.expires_at,
        }))
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<Movie>>> {
        Ok(self.get_entry(key).await?.map(|e| e.results))
    }

    /// Stores `results` under `key`, replacing any previous entry.
    pub async fn set(&self, key: &str, results: &[Movie], ttl: Duration) -> Result<()> {
        let results_json = serde_json::to_string(results)?;
        let now = Utc::now();

        let active_model = search_cache::ActiveModel {
            query: Set(key.to_string()),
            results_json: Set(results_json),
            created_at: Set(timestamp(now)),
            expires_at: Set(timestamp(now + ttl)),
            ..Default::default()
        };

        SearchCache::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(search_cache::Column::Query)
                    .update_columns([
                        search_cache::Column::ResultsJson,
                        search_cache::Column::CreatedAt,
                        search_cache::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = SearchCache::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}

#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub results: Vec<Movie>,
    pub created_at: String,
    pub expires_at: String,
}

impl CachedSearch {
    /// Lifetime the entry was written with.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        let created = DateTime::parse_from_rfc3339(&self.created_at).ok()?;
        let expires = DateTime::parse_from_rfc3339(&self.expires_at).ok()?;
        Some(expires - created)
    }
}
