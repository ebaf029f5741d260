use crate::catalog::CatalogClient;
use crate::config::Config;
use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared handle to the catalog client; production wires an `OmdbClient`,
/// tests wire a fake.
pub type DynCatalog = Arc<dyn CatalogClient>;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub catalog: DynCatalog,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for DynCatalog {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
