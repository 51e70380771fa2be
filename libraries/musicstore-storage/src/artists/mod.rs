use musicstore_core::{error::Result, types::*, StoreError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_artist(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, name
         FROM artists
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_artist))
}

pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    let result = sqlx::query("INSERT INTO artists (name) VALUES (?)")
        .bind(&artist.name)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StoreError::storage("Failed to retrieve created artist"))
}
