//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use musicstore_core::{types::*, AnalyticsSink};
use musicstore_server::{
    config::{ServerConfig, StoreSettings},
    create_router,
    state::AppState,
};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Analytics sink that remembers every event
#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<(String, BTreeMap<String, String>)>>,
}

impl RecordingAnalytics {
    pub fn events_named(&self, name: &str) -> Vec<BTreeMap<String, String>> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(event, _)| event == name)
            .map(|(_, props)| props.clone())
            .collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track_event(&self, name: &str, properties: &BTreeMap<String, String>) {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), properties.clone()));
    }
}

/// A fully wired app over a temp-file database
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub pool: SqlitePool,
    pub analytics: Arc<RecordingAnalytics>,
    _temp_dir: TempDir,
}

/// Create a test database with migrations applied
pub async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let pool = musicstore_storage::open(&db_url).await.unwrap();
    (pool, temp_dir)
}

pub fn test_config(store: StoreSettings) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.antiforgery.secret = TEST_SECRET.to_string();
    config.store = store;
    config
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(StoreSettings::default()).await
}

pub async fn create_test_app_with(store: StoreSettings) -> TestApp {
    let (pool, temp_dir) = create_test_pool().await;
    let analytics = Arc::new(RecordingAnalytics::default());

    let state = AppState::from_config(pool.clone(), &test_config(store), analytics.clone());
    let router = create_router(state.clone());

    TestApp {
        router,
        state,
        pool,
        analytics,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, token: Option<&str>) -> Response {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(token) = token {
            builder = builder.header("RequestVerificationToken", token);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Start a session: returns the `name=value` cookie the server issued
    pub async fn new_session(&self) -> String {
        let response = self.get("/Store/", None).await;
        session_cookie(&response).expect("Server should issue a session cookie")
    }
}

/// The `name=value` part of the session `Set-Cookie` header, if any
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("MusicStore.Session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Test fixture: genre (reused by name), artist and album
pub async fn create_album(pool: &SqlitePool, genre: &str, title: &str, price: &str) -> Album {
    let genre_id = match musicstore_storage::genres::find_by_name(pool, genre)
        .await
        .unwrap()
    {
        Some(existing) => existing.id,
        None => {
            musicstore_storage::genres::create(
                pool,
                CreateGenre {
                    name: genre.to_string(),
                    description: None,
                },
            )
            .await
            .unwrap()
            .id
        }
    };

    let artist_id = musicstore_storage::artists::create(
        pool,
        CreateArtist {
            name: format!("{title} Artist"),
        },
    )
    .await
    .unwrap()
    .id;

    musicstore_storage::albums::create(
        pool,
        CreateAlbum {
            genre_id,
            artist_id,
            title: title.to_string(),
            price: price.parse().unwrap(),
            album_art_url: None,
        },
    )
    .await
    .unwrap()
}
