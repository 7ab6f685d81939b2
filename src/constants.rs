pub mod cache {

    pub const SEARCH_NAMESPACE: &str = "movies:search";

    pub const FOUND_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub const NOT_FOUND_TTL_SECONDS: i64 = 30 * 60;
}

pub mod favorites {

    pub const DEFAULT_USER_ID: &str = "user-123";
}

pub mod omdb {

    /// Marker the catalog uses for a missing poster.
    pub const POSTER_NOT_AVAILABLE: &str = "N/A";

    pub const ERROR_CONTEXT: &str = "MoviesAPI";
}

pub mod limits {

    pub const SEARCH_QUERY_MIN: usize = 2;

    pub const SEARCH_QUERY_MAX: usize = 100;

    pub const IMDB_ID_MIN: usize = 2;

    pub const IMDB_ID_MAX: usize = 50;

    pub const TITLE_MAX: usize = 200;

    pub const YEAR_MAX: usize = 20;
}
