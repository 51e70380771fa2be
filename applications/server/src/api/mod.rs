/// API route modules
pub mod health;
pub mod shopping_cart;
pub mod store;
