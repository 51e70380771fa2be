//! Shopping cart types

use super::{Album, AlbumId, CartId, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CartItemId = i64;

/// One line of a shopping cart, with its album attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub album_id: AlbumId,
    pub count: i64,
    pub date_created: DateTime<Utc>,
    pub album: Album,
}

impl CartItem {
    /// Album price times quantity
    pub fn line_total(&self) -> Price {
        self.album.price * self.count
    }
}

/// What removing one copy from a cart line took out
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedItem {
    /// The line's album, with genre and artist
    pub album: Album,
    /// Copies left on the line; 0 once the line is deleted
    pub remaining: i64,
}
