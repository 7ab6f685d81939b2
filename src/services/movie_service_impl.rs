//! Cache-aside implementation of [`MovieService`] backed by the search cache table.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::clients::{CatalogSearch, OmdbError, OmdbMovie, OmdbSearchResponse};
use crate::config::CacheConfig;
use crate::constants::omdb::{ERROR_CONTEXT, POSTER_NOT_AVAILABLE};
use crate::db::Store;
use crate::domain::search_cache_key;
use crate::domain::validation::validate_search_query;
use crate::models::Movie;
use crate::services::movie_service::{MovieError, MovieService};

pub struct CachedMovieService {
    store: Store,
    catalog: Arc<dyn CatalogSearch>,
    cache: CacheConfig,
}

impl CachedMovieService {
    #[must_use]
    pub fn new(store: Store, catalog: Arc<dyn CatalogSearch>, cache: CacheConfig) -> Self {
        Self {
            store,
            catalog,
            cache,
        }
    }

    fn found_ttl(&self) -> Duration {
        Duration::seconds(self.cache.found_ttl_seconds)
    }

    fn not_found_ttl(&self) -> Duration {
        Duration::seconds(self.cache.not_found_ttl_seconds)
    }

    /// A failed cache read counts as a miss.
    async fn cached(&self, key: &str) -> Option<Vec<Movie>> {
        match self.store.get_cached_search(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Search cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    /// A failed cache write never fails the search.
    async fn store_results(&self, key: &str, movies: &[Movie], ttl: Duration) {
        if let Err(e) = self.store.cache_search_results(key, movies, ttl).await {
            warn!("Failed to cache search results for {}: {}", key, e);
        }
    }

    async fn handle_response(
        &self,
        key: &str,
        response: OmdbSearchResponse,
    ) -> Result<Vec<Movie>, MovieError> {
        if !response.is_success()
            && let Some(message) = response.error.as_deref()
        {
            if is_not_found_message(message) {
                self.store_results(key, &[], self.not_found_ttl()).await;
                return Ok(vec![]);
            }

            warn!("OMDB API error in {}: {}", ERROR_CONTEXT, message);
            return Err(catalog_error(message));
        }

        let Some(records) = response.search else {
            self.store_results(key, &[], self.not_found_ttl()).await;
            return Ok(vec![]);
        };

        let movies = transform_movies(records);
        self.store_results(key, &movies, self.found_ttl()).await;

        Ok(movies)
    }
}

#[async_trait]
impl MovieService for CachedMovieService {
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, MovieError> {
        validate_search_query(query)?;

        let key = search_cache_key(&self.cache.namespace, query);

        if let Some(hit) = self.cached(&key).await {
            metrics::counter!("movie_search_cache_total", "result" => "hit").increment(1);
            debug!("Search cache hit for {}", key);
            return Ok(hit);
        }
        metrics::counter!("movie_search_cache_total", "result" => "miss").increment(1);

        match self.catalog.search(query.trim()).await {
            Ok(response) => self.handle_response(&key, response).await,
            Err(e) => {
                error!("Error searching movies: {}", e);

                // Another request may have filled the cache while we were waiting.
                if let Some(cached) = self.cached(&key).await {
                    metrics::counter!("movie_search_cache_total", "result" => "fallback")
                        .increment(1);
                    return Ok(cached);
                }

                Err(transport_error(&e))
            }
        }
    }
}

fn with_context(message: &str) -> String {
    format!("[{ERROR_CONTEXT}] {message}")
}

fn is_not_found_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("not found") || lower.contains("no results")
}

/// Maps a `Response: "False"` message from the catalog onto the taxonomy.
fn catalog_error(message: &str) -> MovieError {
    if message.to_lowercase().contains("invalid api key") {
        MovieError::Unauthorized(with_context(message))
    } else {
        MovieError::BadRequest(with_context(message))
    }
}

/// Maps a failed catalog call onto the taxonomy.
fn transport_error(err: &OmdbError) -> MovieError {
    match err {
        OmdbError::Status { status, message } => {
            error!("HTTP Error {} in {}: {}", status, ERROR_CONTEXT, message);
            match status {
                400 => MovieError::BadRequest(with_context(message)),
                401 | 403 => MovieError::Unauthorized(with_context(message)),
                429 => MovieError::RateLimited(with_context(message)),
                500 | 502 | 503 => MovieError::Unavailable(with_context(message)),
                _ => MovieError::Internal(with_context(message)),
            }
        }
        OmdbError::NoResponse(_) => MovieError::Unavailable(with_context("No response from service")),
        OmdbError::Decode(_) | OmdbError::Other(_) => {
            MovieError::Internal(with_context("Unknown error occurred"))
        }
    }
}

/// Drops repeated ids (first one wins) and nulls out the "N/A" poster marker.
fn transform_movies(records: Vec<OmdbMovie>) -> Vec<Movie> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter(|m| seen.insert(m.imdb_id.clone()))
        .map(|m| Movie {
            imdb_id: m.imdb_id,
            title: m.title,
            year: m.year,
            poster: m.poster.filter(|p| p != POSTER_NOT_AVAILABLE),
        })
        .collect()
}
