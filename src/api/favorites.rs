use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, FavoriteStatusDto};
use crate::domain::UserId;
use crate::models::{Favorite, NewFavorite};

/// `POST /favorites`
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    payload: Result<Json<NewFavorite>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Favorite>>), ApiError> {
    let Json(item) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    info!("Adding movie to favorites: {}", item.imdb_id);

    let favorite = state.favorite_service().add(&user, item).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(favorite).with_message("Movie added to favorites")),
    ))
}

/// `DELETE /favorites/{imdb_id}`
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Path(imdb_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    info!("Removing favorite: {}", imdb_id);

    state.favorite_service().remove(&user, &imdb_id).await?;

    Ok(Json(ApiResponse::message("Favorite removed successfully")))
}

/// `GET /favorites`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> Result<Json<ApiResponse<Vec<Favorite>>>, ApiError> {
    let favorites = state.favorite_service().list(&user).await?;
    let count = favorites.len();

    Ok(Json(
        ApiResponse::success(favorites)
            .with_count(count)
            .with_message(format!("Found {count} favorites")),
    ))
}

/// `GET /favorites/{imdb_id}`
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Path(imdb_id): Path<String>,
) -> Result<Json<ApiResponse<Favorite>>, ApiError> {
    let favorite = state.favorite_service().get_one(&user, &imdb_id).await?;

    Ok(Json(
        ApiResponse::success(favorite).with_message("Favorite found successfully"),
    ))
}

/// `GET /favorites/{imdb_id}/status`
pub async fn favorite_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Path(imdb_id): Path<String>,
) -> Result<Json<ApiResponse<FavoriteStatusDto>>, ApiError> {
    let is_favorite = state.favorite_service().is_favorite(&user, &imdb_id).await?;

    Ok(Json(ApiResponse::success(FavoriteStatusDto {
        imdb_id,
        is_favorite,
    })))
}
