mod cache;
mod favorites;
mod init;
mod search;

pub use cache::cmd_cache_clear;
pub use favorites::{
    cmd_favorites_add, cmd_favorites_list, cmd_favorites_remove, cmd_favorites_show,
};
pub use init::cmd_init;
pub use search::cmd_search_movies;
