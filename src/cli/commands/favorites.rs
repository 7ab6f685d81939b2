//! Favorites command handlers

use crate::config::Config;
use crate::db::Store;
use crate::domain::UserId;
use crate::models::NewFavorite;
use crate::services::{FavoriteService, SeaOrmFavoriteService};

async fn service(config: &Config) -> anyhow::Result<SeaOrmFavoriteService> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(SeaOrmFavoriteService::new(store))
}

fn resolve_user(config: &Config, user: Option<&str>) -> UserId {
    UserId::new(user.unwrap_or(&config.favorites.default_user_id))
}

pub async fn cmd_favorites_list(config: &Config, user: Option<&str>) -> anyhow::Result<()> {
    let user = resolve_user(config, user);
    let favorites = service(config).await?.list(&user).await?;

    if favorites.is_empty() {
        println!("No favorites for {user}.");
        return Ok(());
    }

    println!("Favorites for {} ({} total)", user, favorites.len());
    println!("{:-<70}", "");

    for fav in favorites {
        println!("★ {} ({})", fav.title, fav.year);
        println!("  ID: {} | Added: {}", fav.imdb_id, fav.created_at);
    }

    Ok(())
}

pub async fn cmd_favorites_add(
    config: &Config,
    user: Option<&str>,
    item: NewFavorite,
) -> anyhow::Result<()> {
    let user = resolve_user(config, user);

    let fav = service(config).await?.add(&user, item).await?;
    println!("Added {} ({}) to favorites", fav.title, fav.imdb_id);

    Ok(())
}

pub async fn cmd_favorites_remove(
    config: &Config,
    user: Option<&str>,
    imdb_id: &str,
) -> anyhow::Result<()> {
    let user = resolve_user(config, user);

    service(config).await?.remove(&user, imdb_id).await?;
    println!("Removed {imdb_id} from favorites");

    Ok(())
}

pub async fn cmd_favorites_show(
    config: &Config,
    user: Option<&str>,
    imdb_id: &str,
) -> anyhow::Result<()> {
    let user = resolve_user(config, user);

    let fav = service(config).await?.get_one(&user, imdb_id).await?;
    println!("{}", serde_json::to_string_pretty(&fav)?);

    Ok(())
}
