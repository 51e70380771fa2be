/// Storefront API routes
use crate::{
    error::{Result, ServerError},
    services::analytics::properties,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use musicstore_core::{Album, AlbumId, CatalogStore, Genre, GenreWithAlbums};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub genre: Option<String>,
}

/// GET /Store/
/// List every genre
pub async fn index(State(app_state): State<AppState>) -> Result<Json<Vec<Genre>>> {
    let genres = app_state.db.get_all_genres().await?;
    Ok(Json(genres))
}

/// GET /Store/Browse?genre=Disco
/// Genre with its albums; exact, case-sensitive match
pub async fn browse(
    State(app_state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<GenreWithAlbums>> {
    let name = query.genre.unwrap_or_default();

    let genre = app_state
        .db
        .find_genre_with_albums(&name)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Genre not found: {name}")))?;

    app_state
        .analytics
        .track_event("Browser", &properties([("genre", name)]));

    Ok(Json(genre))
}

/// GET /Store/Details/:id
/// Album with genre and artist, served from the album cache
pub async fn details(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<Album>> {
    let album = app_state
        .album_cache
        .get_or_load(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {id}")))?;

    app_state.analytics.track_event(
        "product",
        &properties([
            ("album", album.title.clone()),
            ("genre", album.genre_name().unwrap_or_default().to_string()),
        ]),
    );

    Ok(Json(album))
}
