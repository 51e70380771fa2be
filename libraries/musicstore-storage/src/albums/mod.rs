use chrono::Utc;
use musicstore_core::{error::Result, types::*, StoreError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};

/// Album columns shared by every album query, aliased so cart queries can
/// select them next to their own `id`.
pub(crate) const ALBUM_COLUMNS: &str = "a.id AS album_id, a.genre_id, a.artist_id, a.title, \
     a.price_cents, a.album_art_url, a.created";

/// Genre and artist columns for queries that attach relations
pub(crate) const RELATION_COLUMNS: &str =
    "g.name AS genre_name, g.description AS genre_description, ar.name AS artist_name";

pub(crate) fn map_album(row: &SqliteRow) -> Album {
    Album {
        id: row.get("album_id"),
        genre_id: row.get("genre_id"),
        artist_id: row.get("artist_id"),
        title: row.get("title"),
        price: Price::from_cents(row.get("price_cents")),
        album_art_url: row.get("album_art_url"),
        created: row.get("created"),
        genre: None,
        artist: None,
        order_details: Vec::new(),
    }
}

pub(crate) fn map_album_with_relations(row: &SqliteRow) -> Album {
    let mut album = map_album(row);
    album.genre = Some(Genre {
        id: album.genre_id,
        name: row.get("genre_name"),
        description: row.get("genre_description"),
    });
    album.artist = Some(Artist {
        id: album.artist_id,
        name: row.get("artist_name"),
    });
    album
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS}
         FROM albums a
         WHERE a.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_album))
}

/// Get album by ID with genre and artist attached
pub async fn get_details(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let mut conn = pool.acquire().await?;
    fetch_details(&mut conn, id).await
}

/// `get_details` on a connection the caller already holds, such as an open
/// transaction
pub(crate) async fn fetch_details(
    conn: &mut SqliteConnection,
    id: AlbumId,
) -> Result<Option<Album>> {
    let row = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS}, {RELATION_COLUMNS}
         FROM albums a
         INNER JOIN genres g ON a.genre_id = g.id
         INNER JOIN artists ar ON a.artist_id = ar.id
         WHERE a.id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.as_ref().map(map_album_with_relations))
}

pub async fn get_by_genre(pool: &SqlitePool, genre_id: GenreId) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS}
         FROM albums a
         WHERE a.genre_id = ?
         ORDER BY a.title"
    ))
    .bind(genre_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_album).collect())
}

/// Insert a validated album; `created` is stamped here and never updated
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    album.validate()?;

    let result = sqlx::query(
        "INSERT INTO albums (genre_id, artist_id, title, price_cents, album_art_url, created)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(album.genre_id)
    .bind(album.artist_id)
    .bind(&album.title)
    .bind(album.price.cents())
    .bind(&album.album_art_url)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StoreError::storage("Failed to retrieve created album"))
}
