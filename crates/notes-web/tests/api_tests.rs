//! End-to-end tests of the HTTP surface over an in-memory note store

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use notes_config::{DatabaseConfig, ServerConfig};
use notes_store::{
    FolderCount, FolderName, MemoryNoteStore, Note, NoteQuery, NoteStore, StoreError,
    StoreResult, SurrealNoteStore, Window,
};
use notes_web::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

fn app_with(store: impl NoteStore + 'static) -> Router {
    build_router(AppState::new(Arc::new(store)), &ServerConfig::default()).unwrap()
}

/// 3 notes in "A", 2 in "B", in id order n1..n5
fn sample_notes() -> Vec<Note> {
    vec![
        Note::new("n1", "Hello World", "first body", "A"),
        Note::new("n2", "Second", "mentions hello in the body", "A"),
        Note::new("n3", "Third", "nothing to see", "B"),
        Note::new("n4", "Fourth", "still nothing", "A"),
        Note::new("n5", "Fifth", "last one", "B"),
    ]
}

fn sample_app() -> Router {
    app_with(MemoryNoteStore::new(sample_notes()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(notes: &Value) -> Vec<&str> {
    notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect()
}

/// Store whose every call fails, to exercise the 500 path
struct FailingStore;

#[async_trait]
impl NoteStore for FailingStore {
    async fn find(&self, _: &NoteQuery, _: Option<Window>) -> StoreResult<Vec<Note>> {
        Err(StoreError::connection("database unreachable"))
    }
    async fn count(&self, _: &NoteQuery) -> StoreResult<u64> {
        Err(StoreError::connection("database unreachable"))
    }
    async fn sample(&self) -> StoreResult<Option<Note>> {
        Err(StoreError::connection("database unreachable"))
    }
    async fn folder_counts(&self) -> StoreResult<Vec<FolderCount>> {
        Err(StoreError::connection("database unreachable"))
    }
    async fn search_folders(&self, _: &str) -> StoreResult<Vec<FolderName>> {
        Err(StoreError::connection("database unreachable"))
    }
    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::connection("database unreachable"))
    }
}

// ============================================================================
// Root and health
// ============================================================================

#[tokio::test]
async fn test_root_message() {
    let (status, body) = get(sample_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Notes API is running" }));
}

#[tokio::test]
async fn test_health_and_ready() {
    let (status, body) = get(sample_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(sample_app(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (status, _) = get(app_with(FailingStore), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// ============================================================================
// GET /notes/
// ============================================================================

#[tokio::test]
async fn test_list_notes_first_page() {
    let (status, body) = get(sample_app(), "/notes/?page=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["results"]), vec!["n1", "n2"]);
    assert_eq!(body["count"], 5);
    assert_eq!(body["next"], "/notes/?page=2&limit=2");
    assert_eq!(body["previous"], Value::Null);
}

#[tokio::test]
async fn test_list_notes_last_page() {
    let (status, body) = get(sample_app(), "/notes/?page=3&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["results"]), vec!["n5"]);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], "/notes/?page=2&limit=2");
}

#[tokio::test]
async fn test_list_notes_defaults() {
    let (status, body) = get(sample_app(), "/notes/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], Value::Null);
}

#[tokio::test]
async fn test_list_notes_results_expose_string_id() {
    let (_, body) = get(sample_app(), "/notes/?limit=1").await;
    assert_eq!(
        body["results"][0],
        json!({ "id": "n1", "title": "Hello World", "body": "first body", "folder": "A" })
    );
    assert!(body["results"][0].get("_id").is_none());
}

#[tokio::test]
async fn test_list_notes_page_past_end() {
    let (status, body) = get(sample_app(), "/notes/?page=9&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(body["count"], 5);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], "/notes/?page=8&limit=2");
}

#[tokio::test]
async fn test_list_notes_page_far_past_end() {
    let (status, body) = get(sample_app(), "/notes/?page=42949674&limit=100").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(body["previous"], "/notes/?page=42949673&limit=100");

    let (status, body) = get(sample_app(), "/notes/?page=9223372036854775807&limit=100").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_notes_page_far_past_end_on_surrealdb() {
    let store = SurrealNoteStore::connect(&DatabaseConfig::default())
        .await
        .unwrap();
    let app = app_with(store);

    let (status, body) = get(app.clone(), "/notes/?page=42949674&limit=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert!(body["results"].as_array().unwrap().is_empty());

    let (status, _) = get(app, "/notes/?page=9223372036854775807&limit=100").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_notes_parameter_validation() {
    for uri in [
        "/notes/?page=0",
        "/notes/?page=-3",
        "/notes/?limit=0",
        "/notes/?limit=101",
        "/notes/?page=abc",
    ] {
        let (status, body) = get(sample_app(), uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "uri {uri}");
        assert!(body["detail"].is_string(), "uri {uri}");
    }
}

#[tokio::test]
async fn test_store_failure_is_server_error_on_every_data_endpoint() {
    for uri in [
        "/notes/",
        "/notes/search/?q=x",
        "/notes/random/",
        "/notes/by-folder/A",
        "/folders/",
        "/folders/search/?q=x",
        "/folders/A",
    ] {
        let (status, body) = get(app_with(FailingStore), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {uri}");
        assert_eq!(
            body["detail"], "Connection error: database unreachable",
            "uri {uri}"
        );
    }
}

// ============================================================================
// GET /notes/search/
// ============================================================================

#[tokio::test]
async fn test_search_notes_case_insensitive_title_or_body() {
    let (status, body) = get(sample_app(), "/notes/search/?q=HELLO").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), vec!["n1", "n2"]);
}

#[tokio::test]
async fn test_search_notes_with_folder() {
    let (_, body) = get(sample_app(), "/notes/search/?q=nothing&folder=B").await;
    assert_eq!(ids(&body["data"]), vec!["n3"]);

    let (_, body) = get(sample_app(), "/notes/search/?q=nothing&folder=").await;
    assert_eq!(ids(&body["data"]), vec!["n3", "n4"]);
}

#[tokio::test]
async fn test_search_notes_regex_syntax_is_literal() {
    let (_, body) = get(sample_app(), "/notes/search/?q=%5EHello").await;
    assert_eq!(body, json!({ "data": [] }));

    let store = MemoryNoteStore::new(vec![
        Note::new("c1", "^Hello with a caret", "b", "A"),
        Note::new("c2", "Hello plain", "b", "A"),
    ]);
    let (_, body) = get(app_with(store), "/notes/search/?q=%5Ehello").await;
    assert_eq!(ids(&body["data"]), vec!["c1"]);
}

#[tokio::test]
async fn test_search_notes_requires_q() {
    let (status, _) = get(sample_app(), "/notes/search/").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(sample_app(), "/notes/search/?q=").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_notes_no_match() {
    let (status, body) = get(sample_app(), "/notes/search/?q=xyzzy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

// ============================================================================
// GET /notes/random/
// ============================================================================

#[tokio::test]
async fn test_random_note_is_member() {
    let (status, body) = get(sample_app(), "/notes/random/").await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap();
    assert!(sample_notes().iter().any(|n| n.id == id));
}

#[tokio::test]
async fn test_random_note_empty_collection() {
    let (status, body) = get(app_with(MemoryNoteStore::default()), "/notes/random/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No notes found");
}

// ============================================================================
// Folders
// ============================================================================

#[tokio::test]
async fn test_list_folders_sorted_by_count() {
    let (status, body) = get(sample_app(), "/folders/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": [
            { "name": "A", "note_count": 3 },
            { "name": "B", "note_count": 2 },
        ]})
    );
}

#[tokio::test]
async fn test_search_folders_sorted_ascending() {
    let store = MemoryNoteStore::new(vec![
        Note::new("1", "t", "b", "Zen"),
        Note::new("2", "t", "b", "Epicureans"),
        Note::new("3", "t", "b", "Cynics"),
        Note::new("4", "t", "b", "Zen"),
    ]);
    let (status, body) = get(app_with(store), "/folders/search/?q=N").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": [{ "name": "Cynics" }, { "name": "Epicureans" }, { "name": "Zen" }] })
    );
}

#[tokio::test]
async fn test_search_folders_requires_q() {
    let (status, _) = get(sample_app(), "/folders/search/").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_folder_with_notes() {
    let (status, body) = get(sample_app(), "/folders/B").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["folder_name"], "B");
    assert_eq!(body["data"]["note_count"], 2);
    assert_eq!(ids(&body["data"]["notes"]), vec!["n3", "n5"]);
}

#[tokio::test]
async fn test_folder_with_notes_unknown() {
    let (status, body) = get(sample_app(), "/folders/Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Folder not found or no notes in folder");
}

#[tokio::test]
async fn test_folder_name_is_percent_decoded() {
    let store = MemoryNoteStore::new(vec![Note::new("1", "t", "b", "Late Stoa")]);
    let (status, body) = get(app_with(store), "/folders/Late%20Stoa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["folder_name"], "Late Stoa");
}

// ============================================================================
// GET /notes/by-folder/{name}
// ============================================================================

#[tokio::test]
async fn test_notes_by_folder_paginated() {
    let (status, body) = get(sample_app(), "/notes/by-folder/A?page=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["results"]), vec!["n1", "n2"]);
    assert_eq!(body["count"], 3);
    assert_eq!(body["folder"], "A");
    assert_eq!(body["next"], "/notes/by-folder/A?page=2&limit=2");
    assert_eq!(body["previous"], Value::Null);

    let (_, body) = get(sample_app(), "/notes/by-folder/A?page=2&limit=2").await;
    assert_eq!(ids(&body["results"]), vec!["n4"]);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], "/notes/by-folder/A?page=1&limit=2");
}

#[tokio::test]
async fn test_notes_by_folder_links_encode_name() {
    let store = MemoryNoteStore::new(vec![
        Note::new("1", "t", "b", "Late Stoa"),
        Note::new("2", "t", "b", "Late Stoa"),
    ]);
    let (_, body) = get(app_with(store), "/notes/by-folder/Late%20Stoa?limit=1").await;
    assert_eq!(body["folder"], "Late Stoa");
    assert_eq!(body["next"], "/notes/by-folder/Late%20Stoa?page=2&limit=1");
}

#[tokio::test]
async fn test_notes_by_folder_unknown() {
    let (status, _) = get(sample_app(), "/notes/by-folder/Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notes_by_folder_validation_precedes_lookup() {
    let (status, _) = get(sample_app(), "/notes/by-folder/A?limit=500").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// CORS
// ============================================================================

async fn allow_origin_header(origin: &str) -> Option<String> {
    let response = sample_app()
        .oneshot(
            Request::builder()
                .uri("/notes/")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_allow_list() {
    assert_eq!(
        allow_origin_header("http://localhost:3000").await.as_deref(),
        Some("http://localhost:3000")
    );
    assert_eq!(allow_origin_header("https://evil.example").await, None);
}
