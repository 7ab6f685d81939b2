pub mod prelude;

pub mod favorites;
pub mod search_cache;
