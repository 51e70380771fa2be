//! Album types

use super::{Artist, ArtistId, Genre, GenreId, Price, PriceCategory};
use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// Album art URLs longer than this are rejected
pub const MAX_ALBUM_ART_URL_LEN: usize = 1024;

/// Lowest accepted album price (0.01)
pub const MIN_PRICE: Price = Price::from_cents(1);

/// Highest accepted album price (100.00)
pub const MAX_PRICE: Price = Price::from_cents(10_000);

/// An album in the catalog
///
/// `genre` and `artist` are only populated when the album was loaded with
/// its relations (album details); list queries leave them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub genre_id: GenreId,
    pub artist_id: ArtistId,
    pub title: String,
    pub price: Price,
    pub album_art_url: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub artist: Option<Artist>,
    #[serde(default)]
    pub order_details: Vec<OrderDetail>,
}

impl Album {
    pub fn price_category(&self) -> PriceCategory {
        self.price.category()
    }

    /// Genre name, if the genre relation was loaded
    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_ref().map(|g| g.name.as_str())
    }
}

/// A purchased line referencing an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub order_id: i64,
    pub album_id: AlbumId,
    pub quantity: i64,
    pub unit_price: Price,
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub genre_id: GenreId,
    pub artist_id: ArtistId,
    pub title: String,
    pub price: Price,
    pub album_art_url: Option<String>,
}

impl CreateAlbum {
    /// Check the catalog constraints on title, price and art URL.
    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.chars().count();
        if !(2..=160).contains(&title_len) {
            return Err(StoreError::invalid_input(format!(
                "Album title must be between 2 and 160 characters (got {title_len})"
            )));
        }

        if self.price < MIN_PRICE || self.price > MAX_PRICE {
            return Err(StoreError::invalid_input(format!(
                "Album price must be between {MIN_PRICE} and {MAX_PRICE} (got {})",
                self.price
            )));
        }

        if let Some(url) = &self.album_art_url {
            if url.chars().count() > MAX_ALBUM_ART_URL_LEN {
                return Err(StoreError::invalid_input(
                    "Album art URL must be at most 1024 characters",
                ));
            }
        }

        Ok(())
    }
}
