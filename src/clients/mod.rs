pub mod omdb;

pub use omdb::{CatalogSearch, OmdbClient, OmdbError, OmdbMovie, OmdbSearchResponse};
