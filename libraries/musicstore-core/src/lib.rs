//! Music Store Core
//!
//! Storage-agnostic domain types, traits, and error handling for the Music Store.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `Genre`, `Artist`, `CartItem`, `Price`
//! - **Core Traits**: `CatalogStore`, `AnalyticsSink`
//! - **Error Handling**: Unified `StoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use musicstore_core::types::{Price, PriceCategory};
//!
//! let price: Price = "7.99".parse().unwrap();
//! assert_eq!(price.category(), PriceCategory::Normal);
//! assert_eq!(price.to_string(), "7.99");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use traits::{AnalyticsSink, CatalogStore, NullAnalytics};

pub use types::{
    Album, AlbumId, Artist, ArtistId, CartId, CartItem, CartItemId, CreateAlbum, CreateArtist,
    CreateGenre, Genre, GenreId, GenreWithAlbums, Price, PriceCategory, RemovedItem,
};
