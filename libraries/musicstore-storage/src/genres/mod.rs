use crate::albums;
use musicstore_core::{error::Result, types::*, StoreError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_genre(row: &SqliteRow) -> Genre {
    Genre {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

/// Every genre in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        "SELECT id, name, description
         FROM genres
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_genre).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: GenreId) -> Result<Option<Genre>> {
    let row = sqlx::query(
        "SELECT id, name, description
         FROM genres
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_genre))
}

/// Exact, case-sensitive name match; the first genre wins on duplicates
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let row = sqlx::query(
        "SELECT id, name, description
         FROM genres
         WHERE name = ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_genre))
}

/// Find a genre by name and load the albums it owns
pub async fn find_with_albums(pool: &SqlitePool, name: &str) -> Result<Option<GenreWithAlbums>> {
    let Some(genre) = find_by_name(pool, name).await? else {
        return Ok(None);
    };

    let albums = albums::get_by_genre(pool, genre.id).await?;

    Ok(Some(GenreWithAlbums { genre, albums }))
}

pub async fn create(pool: &SqlitePool, genre: CreateGenre) -> Result<Genre> {
    let result = sqlx::query(
        "INSERT INTO genres (name, description)
         VALUES (?, ?)",
    )
    .bind(&genre.name)
    .bind(&genre.description)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StoreError::storage("Failed to retrieve created genre"))
}
