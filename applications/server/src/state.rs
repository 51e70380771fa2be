/// Shared application state
use crate::{
    config::ServerConfig,
    services::{AlbumCache, AntiforgeryService},
};
use musicstore_core::{AnalyticsSink, CatalogStore};
use musicstore_storage::LocalStorageContext;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<LocalStorageContext>,
    pub album_cache: Arc<AlbumCache>,
    pub antiforgery: Arc<AntiforgeryService>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

impl AppState {
    pub fn new(
        db: Arc<LocalStorageContext>,
        album_cache: Arc<AlbumCache>,
        antiforgery: Arc<AntiforgeryService>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            db,
            album_cache,
            antiforgery,
            analytics,
        }
    }

    /// Wire every service from configuration over an open pool
    pub fn from_config(
        pool: SqlitePool,
        config: &ServerConfig,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        let db = Arc::new(LocalStorageContext::new(pool));

        let catalog: Arc<dyn CatalogStore> = db.clone();
        let album_cache = Arc::new(AlbumCache::new(catalog, &config.store));

        let antiforgery = Arc::new(AntiforgeryService::new(
            config.antiforgery.secret.clone(),
            config.antiforgery.token_expiration_hours,
        ));

        Self::new(db, album_cache, antiforgery, analytics)
    }
}
