use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState};
use crate::models::Movie;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Left optional so a missing `q` reports the same validation error as an empty one.
    pub q: Option<String>,
}

/// Searches the movie catalog. Results are cached for 24 hours.
///
/// # Endpoint
/// `GET /movies/search?q=<query>`
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let query = params.q.unwrap_or_default();
    info!("Search request for: \"{}\"", query);

    let movies = state.movie_service().search_movies(&query).await?;

    let message = if movies.is_empty() {
        format!("No movies found for \"{query}\"")
    } else {
        format!("Found {} movies for \"{query}\"", movies.len())
    };
    info!("Search completed: {}", message);

    let count = movies.len();
    Ok(Json(
        ApiResponse::success(movies)
            .with_count(count)
            .with_query(query)
            .with_message(message),
    ))
}
