/// Shopping cart API routes
use crate::{
    error::{Result, ServerError},
    middleware::CartSession,
    services::{analytics::properties, ShoppingCart},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use musicstore_core::{Album, AlbumId, CartItem, CartItemId, CatalogStore, Price};
use serde::Serialize;

pub const ITEM_NOT_FOUND_MESSAGE: &str =
    "Could not find this item, nothing has been removed from your shopping cart.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCartViewModel {
    pub cart_items: Vec<CartItem>,
    pub cart_total: Price,
    /// Token to send back in the `RequestVerificationToken` header when removing items
    pub request_verification_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCartRemoveViewModel {
    pub message: String,
    pub cart_total: Price,
    pub cart_count: i64,
    pub item_count: i64,
    pub delete_id: CartItemId,
}

fn item_event_properties(album: &Album) -> std::collections::BTreeMap<String, String> {
    properties([
        ("price", album.price.to_string()),
        ("pricecategory", album.price_category().to_string()),
        ("genre", album.genre_name().unwrap_or_default().to_string()),
    ])
}

/// GET /ShoppingCart/
/// Current cart lines and total; read-only
pub async fn index(
    State(app_state): State<AppState>,
    session: CartSession,
) -> Result<Json<ShoppingCartViewModel>> {
    let cart = ShoppingCart::get_cart(&session);

    // One read transaction so the lines and the total come from the same snapshot
    let mut tx = app_state.db.pool().begin().await?;
    let cart_items = cart.get_cart_items(&mut tx).await?;
    let cart_total = cart.get_total(&mut tx).await?;
    tx.commit().await?;

    let request_verification_token = app_state.antiforgery.issue_token(cart.id())?;

    app_state.analytics.track_event(
        "Cart",
        &properties([
            ("total", cart_total.to_string()),
            ("items", cart_items.len().to_string()),
        ]),
    );

    Ok(Json(ShoppingCartViewModel {
        cart_items,
        cart_total,
        request_verification_token,
    }))
}

/// GET /ShoppingCart/AddToCart/:id
/// Add one copy of an album, then go back to the cart
pub async fn add_to_cart(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    session: CartSession,
) -> Result<Redirect> {
    let added_album = app_state
        .db
        .get_album_details(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {id}")))?;

    let cart = ShoppingCart::get_cart(&session);

    // Dropping the transaction before commit (e.g. client went away) rolls back
    let mut tx = app_state.db.pool().begin().await?;
    cart.add_to_cart(&mut tx, &added_album).await?;
    tx.commit().await?;

    tracing::info!("Album {} was added to the cart.", added_album.id);
    app_state
        .analytics
        .track_event("Add Cart Item", &item_event_properties(&added_album));

    Ok(Redirect::to("/ShoppingCart/"))
}

/// POST /ShoppingCart/RemoveFromCart/:id
/// Remove one copy of a cart line; anti-forgery protected
pub async fn remove_from_cart(
    Path(id): Path<CartItemId>,
    State(app_state): State<AppState>,
    session: CartSession,
) -> Result<Json<ShoppingCartRemoveViewModel>> {
    let cart = ShoppingCart::get_cart(&session);
    let mut tx = app_state.db.pool().begin().await?;

    // The removal runs before any read so the transaction holds the write lock
    let removed = cart.remove_from_cart(&mut tx, id).await?;

    let (message, item_count) = match &removed {
        Some(item) => {
            let copy = if item.remaining > 0 { "1 copy of " } else { "" };
            (
                format!(
                    "{copy}{} has been removed from your shopping cart.",
                    item.album.title
                ),
                item.remaining,
            )
        }
        None => (ITEM_NOT_FOUND_MESSAGE.to_string(), 0),
    };

    let cart_total = cart.get_total(&mut tx).await?;
    let cart_count = cart.get_count(&mut tx).await?;
    tx.commit().await?;

    if let Some(item) = &removed {
        tracing::info!("Album {} was removed from a cart.", item.album.id);
        app_state
            .analytics
            .track_event("Remove Cart Item", &item_event_properties(&item.album));
    }

    Ok(Json(ShoppingCartRemoveViewModel {
        message,
        cart_total,
        cart_count,
        item_count,
        delete_id: id,
    }))
}
