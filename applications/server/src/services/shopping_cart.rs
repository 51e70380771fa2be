/// Shopping cart service
///
/// A `ShoppingCart` is a handle on one cart id. It owns no connection: the
/// caller passes a connection or transaction to each call and commits
/// mutations itself.
use crate::{error::Result, middleware::CartSession};
use musicstore_core::{Album, CartId, CartItem, CartItemId, Price, RemovedItem};
use musicstore_storage::cart_items;
use sqlx::SqliteConnection;

#[derive(Debug, Clone)]
pub struct ShoppingCart {
    cart_id: CartId,
}

impl ShoppingCart {
    /// Cart for the current session; empty carts have no rows, so this never fails
    pub fn get_cart(session: &CartSession) -> Self {
        Self::new(session.cart_id().clone())
    }

    pub fn new(cart_id: CartId) -> Self {
        Self { cart_id }
    }

    pub fn id(&self) -> &CartId {
        &self.cart_id
    }

    /// Add one copy of `album`, incrementing the existing line if there is one
    pub async fn add_to_cart(
        &self,
        conn: &mut SqliteConnection,
        album: &Album,
    ) -> Result<CartItem> {
        Ok(cart_items::add(conn, &self.cart_id, album.id).await?)
    }

    /// Remove one copy of a line.
    ///
    /// Returns the line's album and how many copies remain (0 once the line
    /// is deleted), or `None` when the line is not in this cart.
    pub async fn remove_from_cart(
        &self,
        conn: &mut SqliteConnection,
        cart_item_id: CartItemId,
    ) -> Result<Option<RemovedItem>> {
        Ok(cart_items::remove_one(conn, &self.cart_id, cart_item_id).await?)
    }

    pub async fn get_cart_items(&self, conn: &mut SqliteConnection) -> Result<Vec<CartItem>> {
        Ok(cart_items::get_by_cart(conn, &self.cart_id).await?)
    }

    pub async fn get_total(&self, conn: &mut SqliteConnection) -> Result<Price> {
        Ok(cart_items::total(conn, &self.cart_id).await?)
    }

    pub async fn get_count(&self, conn: &mut SqliteConnection) -> Result<i64> {
        Ok(cart_items::count(conn, &self.cart_id).await?)
    }
}
