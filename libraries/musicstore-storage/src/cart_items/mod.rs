//! Shopping cart lines
//!
//! Every function takes a `&mut SqliteConnection` so callers can run a
//! mutation and the follow-up reads inside one transaction. Nothing here
//! commits; dropping an uncommitted transaction discards the change.
//!
//! Mutations are single statements that run before any read, so two
//! concurrent requests for the same cart cannot both insert a row for one
//! album or drive `count` below one, and neither trips over the other's
//! WAL snapshot.

use crate::albums::{fetch_details, map_album_with_relations, ALBUM_COLUMNS, RELATION_COLUMNS};
use chrono::Utc;
use musicstore_core::{error::Result, types::*, StoreError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

fn map_cart_item(row: &SqliteRow) -> CartItem {
    CartItem {
        id: row.get("id"),
        cart_id: row.get("cart_id"),
        album_id: row.get("album_id"),
        count: row.get("count"),
        date_created: row.get("date_created"),
        album: map_album_with_relations(row),
    }
}

fn select_items(filter: &str) -> String {
    format!(
        "SELECT ci.id, ci.cart_id, ci.count, ci.date_created, {ALBUM_COLUMNS}, {RELATION_COLUMNS}
         FROM cart_items ci
         INNER JOIN albums a ON ci.album_id = a.id
         INNER JOIN genres g ON a.genre_id = g.id
         INNER JOIN artists ar ON a.artist_id = ar.id
         WHERE {filter}
         ORDER BY ci.id"
    )
}

async fn find(
    conn: &mut SqliteConnection,
    cart_id: &CartId,
    id: CartItemId,
) -> Result<Option<CartItem>> {
    let row = sqlx::query(&select_items("ci.id = ? AND ci.cart_id = ?"))
        .bind(id)
        .bind(cart_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(map_cart_item))
}

/// Add one unit of `album_id` to the cart.
///
/// Inserts a line with `count = 1`, or bumps the existing line for the same
/// album. Returns the line as it is after the write.
pub async fn add(
    conn: &mut SqliteConnection,
    cart_id: &CartId,
    album_id: AlbumId,
) -> Result<CartItem> {
    let row = sqlx::query(
        "INSERT INTO cart_items (cart_id, album_id, count, date_created)
         VALUES (?, ?, 1, ?)
         ON CONFLICT (cart_id, album_id) DO UPDATE SET count = count + 1
         RETURNING id",
    )
    .bind(cart_id)
    .bind(album_id)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    let id: CartItemId = row.get("id");

    find(conn, cart_id, id)
        .await?
        .ok_or_else(|| StoreError::storage("Failed to retrieve cart item after add"))
}

/// Remove one unit of a cart line.
///
/// Returns the line's album and the remaining count: the decremented value
/// when more than one unit was present, otherwise 0 after deleting the line.
/// A line that does not exist in this cart is left alone and yields `None`.
///
/// The first statement is a write, so a transaction takes the write lock
/// before it reads. A read-then-write transaction fails with
/// `SQLITE_BUSY_SNAPSHOT` when another connection commits in between.
pub async fn remove_one(
    conn: &mut SqliteConnection,
    cart_id: &CartId,
    id: CartItemId,
) -> Result<Option<RemovedItem>> {
    let decremented = sqlx::query(
        "UPDATE cart_items SET count = count - 1
         WHERE id = ? AND cart_id = ? AND count > 1
         RETURNING album_id, count",
    )
    .bind(id)
    .bind(cart_id)
    .fetch_optional(&mut *conn)
    .await?;

    let (album_id, remaining): (AlbumId, i64) = match decremented {
        Some(row) => (row.get("album_id"), row.get("count")),
        None => {
            let deleted = sqlx::query(
                "DELETE FROM cart_items
                 WHERE id = ? AND cart_id = ?
                 RETURNING album_id",
            )
            .bind(id)
            .bind(cart_id)
            .fetch_optional(&mut *conn)
            .await?;

            match deleted {
                Some(row) => (row.get("album_id"), 0),
                None => return Ok(None),
            }
        }
    };

    let album = fetch_details(conn, album_id)
        .await?
        .ok_or_else(|| StoreError::not_found("Album", album_id.to_string()))?;

    Ok(Some(RemovedItem { album, remaining }))
}

/// All lines of a cart in insertion order
pub async fn get_by_cart(conn: &mut SqliteConnection, cart_id: &CartId) -> Result<Vec<CartItem>> {
    let rows = sqlx::query(&select_items("ci.cart_id = ?"))
        .bind(cart_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.iter().map(map_cart_item).collect())
}

/// Sum of price × count over the cart; zero when empty
pub async fn total(conn: &mut SqliteConnection, cart_id: &CartId) -> Result<Price> {
    let row = sqlx::query(
        "SELECT COALESCE(SUM(a.price_cents * ci.count), 0) AS total_cents
         FROM cart_items ci
         INNER JOIN albums a ON ci.album_id = a.id
         WHERE ci.cart_id = ?",
    )
    .bind(cart_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(Price::from_cents(row.get("total_cents")))
}

/// Sum of counts over the cart; zero when empty
pub async fn count(conn: &mut SqliteConnection, cart_id: &CartId) -> Result<i64> {
    let row = sqlx::query(
        "SELECT COALESCE(SUM(count), 0) AS item_count
         FROM cart_items
         WHERE cart_id = ?",
    )
    .bind(cart_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.get("item_count"))
}
