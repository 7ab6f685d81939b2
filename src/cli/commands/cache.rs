use crate::config::Config;
use crate::db::Store;

pub async fn cmd_cache_clear(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let removed = store.clear_search_cache().await?;
    println!("Removed {removed} cached searches");
    Ok(())
}
