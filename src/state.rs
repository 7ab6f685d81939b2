use std::sync::Arc;

use crate::clients::{CatalogSearch, OmdbClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CachedMovieService, FavoriteService, MovieService, SeaOrmFavoriteService};

/// Services and connections shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub movie_service: Arc<dyn MovieService>,

    pub favorite_service: Arc<dyn FavoriteService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let omdb = OmdbClient::new(&config.omdb)
            .map_err(|e| anyhow::anyhow!("Failed to build OMDb client: {e}"))?;
        Self::with_catalog(config, Arc::new(omdb)).await
    }

    /// Builds the state around an arbitrary catalog implementation.
    pub async fn with_catalog(
        config: Config,
        catalog: Arc<dyn CatalogSearch>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let movie_service: Arc<dyn MovieService> = Arc::new(CachedMovieService::new(
            store.clone(),
            catalog,
            config.cache.clone(),
        ));

        let favorite_service: Arc<dyn FavoriteService> =
            Arc::new(SeaOrmFavoriteService::new(store.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            movie_service,
            favorite_service,
        })
    }
}
