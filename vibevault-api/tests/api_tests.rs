//! Integration tests for vibevault-api endpoints
//!
//! Tests cover:
//! - Media CRUD status codes and bodies
//! - Validation failures reported per field
//! - Per-user scoping through the X-User-Id header
//! - Library filter, mood matcher and stats views
//! - Health endpoint

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method
use vibevault_api::{build_router, AppState};
use vibevault_common::store::MemoryStore;

/// Test helper: app over a fresh in-memory store
fn setup_app() -> Router {
    build_router(AppState::new(Arc::new(MemoryStore::new())))
}

/// Test helper: request with optional JSON body and user header
fn request(method: &str, uri: &str, body: Option<Value>, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: send a request, returning status and parsed JSON (Null when empty)
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, body)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, request("POST", "/api/media", Some(body), None)).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "vibevault-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_list_starts_empty() {
    let app = setup_app();
    let (status, body) = send(&app, request("GET", "/api/media", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_returns_item_with_defaults() {
    let app = setup_app();
    let created = create(&app, json!({"title": "Dune", "type": "book"})).await;

    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["type"], "book");
    assert_eq!(created["status"], "not_started");
    assert_eq!(created["year"], Value::Null);
    assert_eq!(created["coverUrl"], Value::Null);
    assert_eq!(created["vibes"], json!([]));

    let (_, listed) = send(&app, request("GET", "/api/media", None, None)).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_create_missing_title_is_400() {
    let app = setup_app();
    let (status, body) =
        send(&app, request("POST", "/api/media", Some(json!({"type": "book"})), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_unknown_type_is_400() {
    let app = setup_app();
    let (status, _) = send(
        &app,
        request("POST", "/api/media", Some(json!({"title": "X", "type": "podcast"})), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_blank_title_reports_field() {
    let app = setup_app();
    let (status, body) = send(
        &app,
        request("POST", "/api/media", Some(json!({"title": "  ", "type": "movie"})), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "title");

    let (_, listed) = send(&app, request("GET", "/api/media", None, None)).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = setup_app();
    let created = create(
        &app,
        json!({"title": "Severance", "type": "show", "year": 2022, "vibes": ["eerie"]}),
    )
    .await;
    let uri = format!("/api/media/{}", created["id"].as_str().unwrap());

    let (status, updated) =
        send(&app, request("PATCH", &uri, Some(json!({"status": "completed"})), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["year"], 2022);
    assert_eq!(updated["vibes"], json!(["eerie"]));
    assert_eq!(updated["title"], "Severance");
}

#[tokio::test]
async fn test_patch_unknown_id_is_404_and_store_unchanged() {
    let app = setup_app();
    let created = create(&app, json!({"title": "Dune", "type": "book"})).await;

    let (status, body) = send(
        &app,
        request("PATCH", "/api/media/does-not-exist", Some(json!({"title": "Other"})), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (_, listed) = send(&app, request("GET", "/api/media", None, None)).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_patch_invalid_status_is_400() {
    let app = setup_app();
    let created = create(&app, json!({"title": "Dune", "type": "book"})).await;
    let uri = format!("/api/media/{}", created["id"].as_str().unwrap());

    let (status, _) =
        send(&app, request("PATCH", &uri, Some(json!({"status": "finished"})), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_null_for_required_field_is_400_and_store_unchanged() {
    let app = setup_app();
    let created = create(
        &app,
        json!({"title": "Dune", "type": "book", "status": "in_progress", "vibes": ["epic"]}),
    )
    .await;
    let uri = format!("/api/media/{}", created["id"].as_str().unwrap());

    for body in [
        json!({"title": null}),
        json!({"type": null}),
        json!({"status": null}),
        json!({"vibes": null}),
    ] {
        let (status, error) = send(&app, request("PATCH", &uri, Some(body.clone()), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(error["error"]["code"], "BAD_REQUEST");
    }

    let (_, listed) = send(&app, request("GET", "/api/media", None, None)).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_patch_null_cover_url_clears_it() {
    let app = setup_app();
    let created = create(
        &app,
        json!({"title": "Heat", "type": "movie", "coverUrl": "https://example.com/heat.jpg"}),
    )
    .await;
    let uri = format!("/api/media/{}", created["id"].as_str().unwrap());

    let (status, updated) =
        send(&app, request("PATCH", &uri, Some(json!({"coverUrl": null})), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["coverUrl"], Value::Null);
    assert_eq!(updated["title"], "Heat");
}

#[tokio::test]
async fn test_delete_twice_is_204_then_404() {
    let app = setup_app();
    let created = create(&app, json!({"title": "Dune", "type": "book"})).await;
    let uri = format!("/api/media/{}", created["id"].as_str().unwrap());

    let (first, body) = send(&app, request("DELETE", &uri, None, None)).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (second, _) = send(&app, request("DELETE", &uri, None, None)).await;
    assert_eq!(second, StatusCode::NOT_FOUND);
}

// =============================================================================
// User scoping
// =============================================================================

#[tokio::test]
async fn test_items_scoped_by_user_header() {
    let app = setup_app();
    let body = json!({"title": "Dune", "type": "book"});
    let (status, created) =
        send(&app, request("POST", "/api/media", Some(body), Some("alice"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, bob) = send(&app, request("GET", "/api/media", None, Some("bob"))).await;
    assert_eq!(bob, json!([]));

    let (_, anonymous) = send(&app, request("GET", "/api/media", None, None)).await;
    assert_eq!(anonymous, json!([]));

    let uri = format!("/api/media/{}", created["id"].as_str().unwrap());
    let (status, _) = send(&app, request("DELETE", &uri, None, Some("bob"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, alice) = send(&app, request("GET", "/api/media", None, Some("alice"))).await;
    assert_eq!(alice, json!([created]));
}

#[tokio::test]
async fn test_empty_user_header_is_401() {
    let app = setup_app();
    let (status, body) = send(&app, request("GET", "/api/media", None, Some("  "))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

// =============================================================================
// Views
// =============================================================================

#[tokio::test]
async fn test_list_with_filters() {
    let app = setup_app();
    create(&app, json!({"title": "Dune", "type": "book", "status": "completed"})).await;
    create(&app, json!({"title": "Dune: Part Two", "type": "movie"})).await;
    create(&app, json!({"title": "Severance", "type": "show"})).await;

    let (status, books) =
        send(&app, request("GET", "/api/media?category=book", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books.as_array().unwrap().len(), 1);

    let (_, dune) = send(&app, request("GET", "/api/media?q=DUNE", None, None)).await;
    let titles: Vec<&str> = dune
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dune", "Dune: Part Two"]);

    let (_, unfinished_dune) = send(
        &app,
        request("GET", "/api/media?q=dune&status=not_started", None, None),
    )
    .await;
    assert_eq!(unfinished_dune.as_array().unwrap().len(), 1);
    assert_eq!(unfinished_dune[0]["title"], "Dune: Part Two");
}

#[tokio::test]
async fn test_list_with_bad_filter_is_400() {
    let app = setup_app();
    let (status, _) = send(&app, request("GET", "/api/media?category=podcast", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vibe_vocabulary_and_matches() {
    let app = setup_app();
    create(&app, json!({"title": "Heat", "type": "movie", "vibes": ["intense"]})).await;
    create(&app, json!({"title": "Paddington", "type": "movie", "vibes": ["cozy"]})).await;
    create(
        &app,
        json!({"title": "Dune", "type": "book", "vibes": ["cozy", "intense", "cozy"]}),
    )
    .await;

    let (status, vocabulary) = send(&app, request("GET", "/api/vibes", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vocabulary, json!(["cozy", "intense"]));

    let (_, intense) = send(&app, request("GET", "/api/vibes/intense/media", None, None)).await;
    let titles: Vec<&str> = intense
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Heat", "Dune"]);

    let (_, intense_books) =
        send(&app, request("GET", "/api/vibes/intense/media?type=book", None, None)).await;
    assert_eq!(intense_books.as_array().unwrap().len(), 1);

    let (_, wrong_case) = send(&app, request("GET", "/api/vibes/Intense/media", None, None)).await;
    assert_eq!(wrong_case, json!([]));
}

#[tokio::test]
async fn test_stats_counts_types() {
    let app = setup_app();
    create(&app, json!({"title": "Dune", "type": "book"})).await;
    create(&app, json!({"title": "Heat", "type": "movie"})).await;
    create(&app, json!({"title": "Hyperion", "type": "book"})).await;

    let (status, stats) = send(&app, request("GET", "/api/media/stats", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({"shows": 0, "movies": 1, "books": 2, "total": 3}));
}
