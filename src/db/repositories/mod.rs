pub mod cache;
pub mod favorite;
