use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// A movie saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i32,
    pub user_id: UserId,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub movie_data: serde_json::Value,
    pub created_at: String,
}

/// Request payload for adding a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFavorite {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
}

impl NewFavorite {
    /// Metadata blob stored next to the favorite: the request as received.
    #[must_use]
    pub fn movie_data(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_favorite_accepts_missing_poster() {
        let item: NewFavorite = serde_json::from_str(
            r#"{"imdbID":"tt0372784","title":"Batman Begins","year":"2005"}"#,
        )
        .unwrap();

        assert_eq!(item.imdb_id, "tt0372784");
        assert!(item.poster.is_none());
        assert_eq!(item.movie_data()["imdbID"], "tt0372784");
    }

    #[test]
    fn test_favorite_serializes_camel_case() {
        let favorite = Favorite {
            id: 1,
            user_id: UserId::new("user-123"),
            imdb_id: "tt1".to_string(),
            title: "One".to_string(),
            year: "2001".to_string(),
            poster: None,
            movie_data: serde_json::json!({}),
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&favorite).unwrap();
        assert_eq!(json["userId"], "user-123");
        assert_eq!(json["imdbID"], "tt1");
        assert!(json["createdAt"].is_string());
        assert!(json["movieData"].is_object());
    }
}
