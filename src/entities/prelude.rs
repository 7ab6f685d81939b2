pub use super::favorites::Entity as Favorites;
pub use super::search_cache::Entity as SearchCache;
