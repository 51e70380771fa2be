//! Genre types

use super::Album;
use serde::{Deserialize, Serialize};

pub type GenreId = i64;

/// A music genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: Option<String>,
}

/// A genre together with the albums it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreWithAlbums {
    #[serde(flatten)]
    pub genre: Genre,
    pub albums: Vec<Album>,
}

/// Data for creating a new genre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenre {
    pub name: String,
    pub description: Option<String>,
}
