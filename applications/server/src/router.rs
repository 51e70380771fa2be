/// HTTP routes
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

pub fn create_router(app_state: AppState) -> Router {
    let store_routes = Router::new()
        .route("/Store", get(api::store::index))
        .route("/Store/", get(api::store::index))
        .route("/Store/Browse", get(api::store::browse))
        .route("/Store/Details/:id", get(api::store::details));

    // Removal is a state-changing POST, so it requires a token bound to the session
    let cart_routes = Router::new()
        .route("/ShoppingCart", get(api::shopping_cart::index))
        .route("/ShoppingCart/", get(api::shopping_cart::index))
        .route(
            "/ShoppingCart/AddToCart/:id",
            get(api::shopping_cart::add_to_cart),
        )
        .route(
            "/ShoppingCart/RemoveFromCart/:id",
            post(api::shopping_cart::remove_from_cart).route_layer(
                axum_middleware::from_fn_with_state(
                    Arc::clone(&app_state.antiforgery),
                    middleware::antiforgery_middleware,
                ),
            ),
        );

    Router::new()
        .route("/api/health", get(api::health::health))
        .merge(store_routes)
        .merge(cart_routes)
        .layer(axum_middleware::from_fn(middleware::session_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .with_state(app_state)
}
