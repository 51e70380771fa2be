/// Server services
pub mod album_cache;
pub mod analytics;
pub mod antiforgery;
pub mod shopping_cart;

pub use album_cache::AlbumCache;
pub use analytics::TracingAnalytics;
pub use antiforgery::AntiforgeryService;
pub use shopping_cart::ShoppingCart;
