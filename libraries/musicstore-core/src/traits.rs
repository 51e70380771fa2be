/// Core traits for the Music Store
use crate::error::Result;
use crate::types::{Album, AlbumId, Genre, GenreWithAlbums};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Read access to the catalog (genres, artists, albums)
///
/// Relations are loaded explicitly by the method that needs them; there is
/// no lazy navigation.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Get every genre, unordered, no pagination
    async fn get_all_genres(&self) -> Result<Vec<Genre>>;

    /// Find a genre by exact (case-sensitive) name, with its albums
    async fn find_genre_with_albums(&self, name: &str) -> Result<Option<GenreWithAlbums>>;

    /// Get album by ID with its genre and artist attached
    async fn get_album_details(&self, id: AlbumId) -> Result<Option<Album>>;
}

/// Fire-and-forget sink for analytics events
///
/// Implementations must not fail the caller; delivery problems are theirs
/// to log.
pub trait AnalyticsSink: Send + Sync {
    fn track_event(&self, name: &str, properties: &BTreeMap<String, String>);
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnalytics;

impl AnalyticsSink for NullAnalytics {
    fn track_event(&self, _name: &str, _properties: &BTreeMap<String, String>) {}
}
