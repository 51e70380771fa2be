/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_json, create_album, create_test_app, session_cookie};
use musicstore_core::Price;
use musicstore_server::api::shopping_cart::ITEM_NOT_FOUND_MESSAGE;
use tower::util::ServiceExt;

async fn cart_token(app: &common::TestApp, cookie: &str) -> String {
    let response = app.get("/ShoppingCart/", Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["requestVerificationToken"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["album_cache"], true);
}

#[tokio::test]
async fn test_store_index_lists_genres() {
    let app = create_test_app().await;
    create_album(&app.pool, "Rock", "Rock Album", "7.00").await;
    create_album(&app.pool, "Jazz", "Jazz Album", "8.99").await;

    let response = app.get("/Store/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Rock", "Jazz"]);
}

#[tokio::test]
async fn test_browse_genre_with_albums() {
    let app = create_test_app().await;
    create_album(&app.pool, "Disco", "Disco Inferno", "8.99").await;
    create_album(&app.pool, "Disco", "Le Freak", "5.99").await;
    create_album(&app.pool, "Rock", "Not Disco", "7.00").await;

    let response = app.get("/Store/Browse?genre=Disco", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Disco");
    let albums = json["albums"].as_array().unwrap();
    assert_eq!(albums.len(), 2);
    assert!(albums.iter().all(|a| a["title"] != "Not Disco"));

    let events = app.analytics.events_named("Browser");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["genre"], "Disco");
}

#[tokio::test]
async fn test_browse_unknown_genre_is_not_found() {
    let app = create_test_app().await;
    create_album(&app.pool, "Disco", "Disco Inferno", "8.99").await;

    let response = app.get("/Store/Browse?genre=NoSuchGenre", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Genre names match exactly
    let response = app.get("/Store/Browse?genre=disco", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/Store/Browse", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(app.analytics.events_named("Browser").is_empty());
}

#[tokio::test]
async fn test_details_includes_genre_and_artist() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;

    let response = app.get(&format!("/Store/Details/{}", album.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Highway");
    assert_eq!(json["price"], "7.00");
    assert_eq!(json["genre"]["name"], "Rock");
    assert_eq!(json["artist"]["name"], "Highway Artist");

    let events = app.analytics.events_named("product");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["album"], "Highway");
    assert_eq!(events[0]["genre"], "Rock");
}

#[tokio::test]
async fn test_details_unknown_album_is_not_found() {
    let app = create_test_app().await;

    let response = app.get("/Store/Details/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_details_poisoned_album_is_bad_request() {
    let app = create_test_app().await;
    for i in 1..=6 {
        create_album(&app.pool, "Rock", &format!("Album {i}"), "7.00").await;
    }

    let response = app.get("/Store/Details/6", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/Store/Details/5", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_cookie_issued_once() {
    let app = create_test_app().await;

    let response = app.get("/Store/", None).await;
    let cookie = session_cookie(&response).expect("Session cookie should be issued");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    let response = app.get("/Store/", Some(&cookie)).await;
    assert!(session_cookie(&response).is_none());

    // Malformed ids are replaced
    let response = app.get("/Store/", Some("MusicStore.Session=garbage")).await;
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_add_view_and_remove_over_http() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;
    let cookie = app.new_session().await;

    let response = app
        .get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/ShoppingCart/"
    );

    let response = app.get("/ShoppingCart/", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["cartTotal"], "7.00");
    assert_eq!(json["cartItems"].as_array().unwrap().len(), 1);
    assert_eq!(json["cartItems"][0]["count"], 1);

    app.get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&cookie))
        .await;

    let response = app.get("/ShoppingCart/", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["cartTotal"], "14.00");
    assert_eq!(json["cartItems"].as_array().unwrap().len(), 1);
    assert_eq!(json["cartItems"][0]["count"], 2);
    let item_id = json["cartItems"][0]["id"].as_i64().unwrap();
    let token = json["requestVerificationToken"].as_str().unwrap().to_string();

    let uri = format!("/ShoppingCart/RemoveFromCart/{item_id}");
    let response = app.post(&uri, Some(&cookie), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["itemCount"], 1);
    assert_eq!(json["cartTotal"], "7.00");
    assert_eq!(json["cartCount"], 1);
    assert_eq!(json["deleteId"], item_id);
    assert_eq!(
        json["message"],
        "1 copy of Highway has been removed from your shopping cart."
    );

    let response = app.post(&uri, Some(&cookie), Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["itemCount"], 0);
    assert_eq!(json["cartTotal"], "0.00");
    assert_eq!(json["cartCount"], 0);
    assert_eq!(
        json["message"],
        "Highway has been removed from your shopping cart."
    );
}

#[tokio::test]
async fn test_remove_unknown_item_reports_nothing_removed() {
    let app = create_test_app().await;
    let cookie = app.new_session().await;
    let token = cart_token(&app, &cookie).await;

    let response = app
        .post("/ShoppingCart/RemoveFromCart/4242", Some(&cookie), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], ITEM_NOT_FOUND_MESSAGE);
    assert_eq!(json["itemCount"], 0);
    assert_eq!(json["deleteId"], 4242);
    assert!(app.analytics.events_named("Remove Cart Item").is_empty());
}

#[tokio::test]
async fn test_remove_requires_token_for_this_session() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;

    let cookie = app.new_session().await;
    let other_cookie = app.new_session().await;
    assert_ne!(cookie, other_cookie);

    app.get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&cookie))
        .await;
    let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    let item_id = json["cartItems"][0]["id"].as_i64().unwrap();
    let uri = format!("/ShoppingCart/RemoveFromCart/{item_id}");

    // No token
    let response = app.post(&uri, Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Token issued to another session
    let other_token = cart_token(&app, &other_cookie).await;
    let response = app.post(&uri, Some(&cookie), Some(&other_token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Garbage token
    let response = app.post(&uri, Some(&cookie), Some("not-a-token")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    assert_eq!(json["cartItems"][0]["count"], 1);
    assert_eq!(json["cartTotal"], "7.00");
}

#[tokio::test]
async fn test_remove_is_scoped_to_the_session_cart() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;

    let owner = app.new_session().await;
    app.get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&owner))
        .await;
    let json = body_json(app.get("/ShoppingCart/", Some(&owner)).await).await;
    let item_id = json["cartItems"][0]["id"].as_i64().unwrap();

    let intruder = app.new_session().await;
    let token = cart_token(&app, &intruder).await;
    let response = app
        .post(
            &format!("/ShoppingCart/RemoveFromCart/{item_id}"),
            Some(&intruder),
            Some(&token),
        )
        .await;
    let json = body_json(response).await;
    assert_eq!(json["message"], ITEM_NOT_FOUND_MESSAGE);

    let json = body_json(app.get("/ShoppingCart/", Some(&owner)).await).await;
    assert_eq!(json["cartItems"][0]["count"], 1);
}

#[tokio::test]
async fn test_add_unknown_album_is_not_found() {
    let app = create_test_app().await;
    let cookie = app.new_session().await;

    let response = app.get("/ShoppingCart/AddToCart/999", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    assert!(json["cartItems"].as_array().unwrap().is_empty());
    assert_eq!(json["cartTotal"], "0.00");
    assert!(app.analytics.events_named("Add Cart Item").is_empty());
}

#[tokio::test]
async fn test_add_with_non_numeric_id_is_rejected() {
    let app = create_test_app().await;

    let response = app.get("/ShoppingCart/AddToCart/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_viewing_cart_does_not_change_it() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;
    let cookie = app.new_session().await;
    app.get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&cookie))
        .await;

    let first = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    let second = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;

    assert_eq!(first["cartItems"], second["cartItems"]);
    assert_eq!(first["cartTotal"], second["cartTotal"]);
    assert_eq!(app.analytics.events_named("Cart").len(), 2);
}

#[tokio::test]
async fn test_cart_item_events_carry_price_details() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;
    let cookie = app.new_session().await;

    app.get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&cookie))
        .await;

    let events = app.analytics.events_named("Add Cart Item");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["price"], "7.00");
    assert_eq!(events[0]["pricecategory"], "Normal");
    assert_eq!(events[0]["genre"], "Rock");

    let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    let item_id = json["cartItems"][0]["id"].as_i64().unwrap();
    let token = json["requestVerificationToken"].as_str().unwrap().to_string();
    app.post(
        &format!("/ShoppingCart/RemoveFromCart/{item_id}"),
        Some(&cookie),
        Some(&token),
    )
    .await;

    let events = app.analytics.events_named("Remove Cart Item");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["pricecategory"], "Normal");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_removes_of_one_line_all_succeed() {
    let app = create_test_app().await;
    let album = create_album(&app.pool, "Rock", "Highway", "7.00").await;
    let cookie = app.new_session().await;

    for _ in 0..16 {
        app.get(&format!("/ShoppingCart/AddToCart/{}", album.id), Some(&cookie))
            .await;
    }
    let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    assert_eq!(json["cartItems"][0]["count"], 16);
    let item_id = json["cartItems"][0]["id"].as_i64().unwrap();
    let token = json["requestVerificationToken"].as_str().unwrap().to_string();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let router = app.router.clone();
        let request = Request::builder()
            .method("POST")
            .uri(format!("/ShoppingCart/RemoveFromCart/{item_id}"))
            .header(header::COOKIE, &cookie)
            .header("RequestVerificationToken", &token)
            .body(Body::empty())
            .unwrap();
        handles.push(tokio::spawn(async move {
            router.oneshot(request).await.unwrap()
        }));
    }

    let mut item_counts = Vec::new();
    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        item_counts.push(body_json(response).await["itemCount"].as_i64().unwrap());
    }
    item_counts.sort_unstable();
    assert_eq!(item_counts, (0..16).collect::<Vec<i64>>());

    let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
    assert!(json["cartItems"].as_array().unwrap().is_empty());
    assert_eq!(json["cartTotal"], "0.00");
    assert_eq!(app.analytics.events_named("Remove Cart Item").len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cart_view_total_matches_lines_during_adds() {
    let app = create_test_app().await;
    let albums = [
        create_album(&app.pool, "Rock", "Highway", "7.00").await,
        create_album(&app.pool, "Jazz", "Kind Of Blue", "8.99").await,
    ];
    let cookie = app.new_session().await;

    let mut adders = Vec::new();
    for i in 0..12 {
        let router = app.router.clone();
        let request = Request::builder()
            .uri(format!("/ShoppingCart/AddToCart/{}", albums[i % 2].id))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        adders.push(tokio::spawn(async move {
            router.oneshot(request).await.unwrap().status()
        }));
    }

    for _ in 0..12 {
        let json = body_json(app.get("/ShoppingCart/", Some(&cookie)).await).await;
        let line_sum: Price = json["cartItems"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| {
                let price: Price = item["album"]["price"].as_str().unwrap().parse().unwrap();
                price * item["count"].as_i64().unwrap()
            })
            .sum();
        assert_eq!(json["cartTotal"], line_sum.to_string());
    }

    for adder in adders {
        assert_eq!(adder.await.unwrap(), StatusCode::SEE_OTHER);
    }
}
