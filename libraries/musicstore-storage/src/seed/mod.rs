//! Sample catalog for development databases

use crate::{albums, artists, genres, StorageError};
use musicstore_core::types::*;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

const PLACEHOLDER_ART: &str = "/Images/placeholder.png";

const GENRES: &[(&str, &str)] = &[
    ("Rock", "Rock and Roll is a form of rock music developed in the 1950s and 1960s"),
    ("Jazz", "Jazz is a type of music which originated in the United States"),
    ("Metal", "Heavy Metal is a loud, aggressive style of Rock music"),
    ("Alternative", "Alternative rock is a genre of rock music"),
    ("Disco", "Disco is a style of pop music that was popular in the mid-1970s"),
    ("Blues", "The Blues is a form of musical expression"),
    ("Latin", "Latin American music comes from the countries of Latin America"),
    ("Reggae", "Reggae is a music genre first developed in Jamaica"),
    ("Pop", "Pop music is a genre of popular music"),
    ("Classical", "Classical music is art music produced in Western musical tradition"),
];

/// (genre, artist, title, price)
const ALBUMS: &[(&str, &str, &str, &str)] = &[
    ("Rock", "AC/DC", "For Those About To Rock We Salute You", "8.99"),
    ("Rock", "Led Zeppelin", "Led Zeppelin IV", "9.99"),
    ("Rock", "U2", "Achtung Baby", "7.99"),
    ("Jazz", "Miles Davis", "Kind of Blue", "8.99"),
    ("Jazz", "John Coltrane", "A Love Supreme", "5.00"),
    ("Metal", "Metallica", "Master Of Puppets", "9.00"),
    ("Metal", "Iron Maiden", "Powerslave", "4.99"),
    ("Alternative", "Pearl Jam", "Ten", "8.99"),
    ("Disco", "Donna Summer", "Bad Girls", "5.99"),
    ("Blues", "Eric Clapton", "Unplugged", "6.99"),
    ("Latin", "Antonio Carlos Jobim", "Wave", "8.99"),
    ("Reggae", "Bob Marley", "Legend", "7.99"),
    ("Pop", "Michael Jackson", "Thriller", "9.99"),
    ("Classical", "Yo-Yo Ma", "Bach: The Cello Suites", "3.99"),
];

/// What a seeding run inserted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub genres: usize,
    pub artists: usize,
    pub albums: usize,
}

/// Insert the sample catalog into an empty database.
///
/// Does nothing when any genre already exists.
pub async fn run(pool: &SqlitePool) -> Result<SeedSummary, StorageError> {
    let existing: i64 = sqlx::query("SELECT COUNT(*) AS n FROM genres")
        .fetch_one(pool)
        .await?
        .get("n");

    if existing > 0 {
        tracing::info!("Catalog already has {} genres, skipping seed", existing);
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();

    let mut genre_ids = HashMap::new();
    for (name, description) in GENRES {
        let genre = genres::create(
            pool,
            CreateGenre {
                name: (*name).to_string(),
                description: Some((*description).to_string()),
            },
        )
        .await?;
        genre_ids.insert(*name, genre.id);
        summary.genres += 1;
    }

    let mut artist_ids = HashMap::new();
    for (genre, artist, title, price) in ALBUMS {
        let artist_id = match artist_ids.get(artist) {
            Some(id) => *id,
            None => {
                let created = artists::create(
                    pool,
                    CreateArtist {
                        name: (*artist).to_string(),
                    },
                )
                .await?;
                artist_ids.insert(*artist, created.id);
                summary.artists += 1;
                created.id
            }
        };

        let genre_id = genre_ids.get(genre).copied().ok_or_else(|| {
            musicstore_core::StoreError::invalid_input(format!("Unknown seed genre {genre}"))
        })?;

        albums::create(
            pool,
            CreateAlbum {
                genre_id,
                artist_id,
                title: (*title).to_string(),
                price: price.parse()?,
                album_art_url: Some(PLACEHOLDER_ART.to_string()),
            },
        )
        .await?;
        summary.albums += 1;
    }

    tracing::info!(
        "Seeded {} genres, {} artists, {} albums",
        summary.genres,
        summary.artists,
        summary.albums
    );

    Ok(summary)
}
