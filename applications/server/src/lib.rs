//! Music Store Server Library
//!
//! Storefront HTTP server: catalog browsing, cached album details and a
//! session-scoped shopping cart.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{
    album_cache::AlbumCache, analytics::TracingAnalytics, antiforgery::AntiforgeryService,
    shopping_cart::ShoppingCart,
};
pub use state::AppState;
