/// Album details cache
///
/// Album detail pages are read far more often than the catalog changes, so
/// loaded albums (with genre and artist) are kept in memory and dropped
/// after a period without reads.
use crate::config::StoreSettings;
use moka::future::Cache;
use musicstore_core::{error::Result, Album, AlbumId, CatalogStore, StoreError};
use std::sync::Arc;

pub struct AlbumCache {
    store: Arc<dyn CatalogStore>,
    cache: Cache<String, Album>,
    enabled: bool,
    poisoned_album_id: Option<AlbumId>,
}

impl AlbumCache {
    pub fn new(store: Arc<dyn CatalogStore>, settings: &StoreSettings) -> Self {
        // time_to_idle: every read restarts the expiration window
        let cache = Cache::builder()
            .max_capacity(settings.cache_max_capacity)
            .time_to_idle(settings.cache_sliding_expiration())
            .build();

        Self {
            store,
            cache,
            enabled: settings.cache_db_results,
            poisoned_album_id: settings.poisoned_album_id,
        }
    }

    pub fn cache_key(id: AlbumId) -> String {
        format!("album_{id}")
    }

    /// Get album details, loading from the catalog on a miss.
    ///
    /// Returns `Ok(None)` when the album does not exist; misses are not
    /// cached. The poisoned id is rejected with `InvalidInput` before any
    /// lookup.
    pub async fn get_or_load(&self, id: AlbumId) -> Result<Option<Album>> {
        if self.poisoned_album_id == Some(id) {
            tracing::warn!("Rejected details request for poisoned album {}", id);
            return Err(StoreError::invalid_input(format!(
                "Album {id} cannot be displayed"
            )));
        }

        let key = Self::cache_key(id);

        if self.enabled {
            if let Some(album) = self.cache.get(&key).await {
                tracing::debug!("Album cache hit for {}", key);
                return Ok(Some(album));
            }
        }

        let album = self.store.get_album_details(id).await?;

        if let Some(album) = &album {
            if self.enabled {
                tracing::debug!("Caching {}", key);
                self.cache.insert(key, album.clone()).await;
            }
        }

        Ok(album)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
