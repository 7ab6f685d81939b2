pub mod favorite;
pub mod movie;

pub use favorite::{Favorite, NewFavorite};
pub use movie::Movie;
