use crate::{albums, genres};
use async_trait::async_trait;
use musicstore_core::{error::Result, traits::CatalogStore, types::*};
use sqlx::SqlitePool;

/// Local catalog storage using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for LocalStorageContext {
    async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        genres::get_all(&self.pool).await
    }

    async fn find_genre_with_albums(&self, name: &str) -> Result<Option<GenreWithAlbums>> {
        genres::find_with_albums(&self.pool, name).await
    }

    async fn get_album_details(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_details(&self.pool, id).await
    }
}
