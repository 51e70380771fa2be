/// Request middleware
pub mod antiforgery;
pub mod session;

pub use antiforgery::antiforgery_middleware;
pub use session::{session_middleware, CartSession, SESSION_COOKIE};
