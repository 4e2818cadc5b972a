//! End-to-end tests for the playground HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! DocumentStore -> HTTP response. They use `tower::ServiceExt::oneshot` to
//! send requests directly to the router without starting a network server.
//! Tests that inspect the data directory use an `FsStore` in a temp dir.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use playground_server::cookie::CookieGate;
use playground_server::router::build_router;
use playground_server::state::AppState;
use playground_storage::{DocumentStore, FsStore, InMemoryStore};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    build_router(AppState::in_memory())
}

/// Router over a filesystem store; the temp dir must outlive the router.
fn fs_app() -> (tempfile::TempDir, Arc<FsStore>, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FsStore::open(dir.path().join("data")).unwrap());
    let app = build_router(AppState::with_store(store.clone()));
    (dir, store, app)
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Body>,
    headers: &[(&str, &str)],
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(path);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    let response = app
        .clone()
        .oneshot(builder.body(body.unwrap_or_else(Body::empty)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn post_json_with(
    app: &Router,
    path: &str,
    body: serde_json::Value,
    headers: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let mut all = vec![("content-type", "application/json")];
    all.extend_from_slice(headers);
    let (status, bytes) = send(
        app,
        Method::POST,
        path,
        Some(Body::from(serde_json::to_vec(&body).unwrap())),
        &all,
    )
    .await;
    (status, serde_json::from_slice(&bytes).unwrap_or(json!(null)))
}

async fn post_json(app: &Router, path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    post_json_with(app, path, body, &[]).await
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = send(app, Method::GET, path, None, &[]).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(json!(null)))
}

fn sample_doc() -> serde_json::Value {
    json!({
        "files": [
            { "name": "app.html", "content": "<p>hi</p>" },
            { "name": "app.js", "content": "x", "selections": "0:1" }
        ],
        "links": ["lodash"]
    })
}

/// Saves `doc` without an id and returns the minted id.
async fn fresh_save(app: &Router, doc: serde_json::Value) -> String {
    let (status, body) = post_json(app, "/save", doc).await;
    assert_eq!(status, StatusCode::OK, "fresh save failed: {:?}", body);
    assert_eq!(body["error"], json!(false));
    body["data"]["id"].as_str().unwrap().to_string()
}

fn data_files(dir: &tempfile::TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path().join("data"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_serves_host_page() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn index_exposes_console_entry_points() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8_lossy(&bytes);

    assert!(page.contains("self.zPlayground = {"));
    for entry in ["addFile(file)", "removeFile(name)", "addLib(name)", "removeLib(name)"] {
        assert!(page.contains(entry), "missing console entry point {entry}");
    }
    assert!(page.contains("widget.set(toOptions(doc))"));
    for message in [
        "Invalid file",
        "File name must be a string",
        "File content must be a string",
        "File selections must be a string",
        "File compiler must be a string or a function",
    ] {
        assert!(page.contains(message), "missing validation message {message:?}");
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get_json(&test_app(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

// ---------------------------------------------------------------------------
// Save and read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_save_then_read_returns_same_document() {
    let app = test_app();
    let doc = json!({ "files": [{ "name": "app.js", "content": "x" }], "links": [] });
    let id = fresh_save(&app, doc.clone()).await;

    let (status, body) = get_json(&app, &format!("/data/{}.json", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, doc);
}

#[tokio::test]
async fn read_is_also_answered_for_post() {
    let app = test_app();
    let id = fresh_save(&app, sample_doc()).await;
    let (status, bytes) = send(&app, Method::POST, &format!("/data/{}.json", id), None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, sample_doc());
}

#[tokio::test]
async fn update_overwrites_existing_record() {
    let app = test_app();
    let id = fresh_save(&app, sample_doc()).await;

    let mut changed = sample_doc();
    changed["files"][1]["content"] = json!("y");
    changed["links"] = json!(["lodash", "react"]);
    let (status, body) = post_json(&app, &format!("/save?id={}", id), changed.clone()).await;
    assert_eq!(status, StatusCode::OK, "{:?}", body);
    assert_eq!(body["data"]["id"], json!(id));

    let (_, read) = get_json(&app, &format!("/data/{}.json", id)).await;
    assert_eq!(read, changed);
}

#[tokio::test]
async fn empty_id_query_mints_a_new_identifier() {
    let app = test_app();
    let (status, body) = post_json(&app, "/save?id=", sample_doc()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn fresh_saves_get_distinct_identifiers() {
    let app = test_app();
    let a = fresh_save(&app, sample_doc()).await;
    let b = fresh_save(&app, sample_doc()).await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn update_of_unknown_id_is_save_error_and_creates_nothing() {
    let (dir, _store, app) = fs_app();
    let (status, body) = post_json(&app, "/save?id=does-not-exist", sample_doc()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "SAVE_ERROR" }));
    assert!(data_files(&dir).is_empty());
}

#[tokio::test]
async fn traversal_id_on_save_is_rejected() {
    let (dir, _store, app) = fs_app();
    std::fs::write(dir.path().join("victim.json"), "original").unwrap();

    for id in ["..%2Fvictim", "../victim", ".hidden", "a%5Cb"] {
        let (status, body) = post_json(&app, &format!("/save?id={}", id), sample_doc()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "id {id}");
        assert_eq!(body, json!({ "error": "SAVE_ERROR" }));
    }
    assert_eq!(std::fs::read_to_string(dir.path().join("victim.json")).unwrap(), "original");
    assert!(data_files(&dir).is_empty());
}

#[tokio::test]
async fn saved_record_is_tab_indented_json_on_disk() {
    let (dir, _store, app) = fs_app();
    let id = fresh_save(&app, sample_doc()).await;
    assert_eq!(data_files(&dir), vec![format!("{}.json", id)]);

    let text = std::fs::read_to_string(dir.path().join("data").join(format!("{}.json", id))).unwrap();
    assert!(text.starts_with("{\n\t\"files\": ["), "{text}");
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, sample_doc());
}

#[tokio::test]
async fn malformed_payload_is_bad_request() {
    let app = test_app();
    let (status, body) = post_json(&app, "/save", json!({ "files": "nope", "links": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Bad Request" }));

    let (status, _) = send(
        &app,
        Method::POST,
        "/save",
        Some(Body::from("{not json")),
        &[("content-type", "application/json")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn read_failures_are_indistinguishable() {
    let store = Arc::new(InMemoryStore::new());
    store.insert_raw("corrupt", "{\"files\": 3}").unwrap();
    let app = build_router(AppState::with_store(store));

    for path in [
        "/data/missing.json",
        "/data/corrupt.json",
        "/data/..%2Fsecret.json",
        "/data/.hidden.json",
        "/data/no-extension",
    ] {
        let (status, bytes) = send(&app, Method::GET, path, None, &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "path {path}");
        assert_eq!(bytes, br#"{"error":"Bad Request"}"#, "path {path}");
    }
}

#[tokio::test]
async fn read_does_not_escape_store_root() {
    let (dir, _store, app) = fs_app();
    std::fs::write(dir.path().join("outside.json"), r#"{"files":[],"links":[]}"#).unwrap();
    let (status, _) = get_json(&app, "/data/..%2Foutside.json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Cookie gate
// ---------------------------------------------------------------------------

fn gated_app() -> (Arc<InMemoryStore>, Router) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::with_store(store.clone()).with_cookie_gate(CookieGate::new("editor", "s3cret"));
    (store, build_router(state))
}

#[tokio::test]
async fn gate_rejects_missing_or_wrong_cookie() {
    let (store, app) = gated_app();

    let (status, body) = post_json(&app, "/save", sample_doc()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "SAVE_ERROR" }));

    let (status, _) = post_json_with(&app, "/save", sample_doc(), &[("cookie", "editor=nope")]).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.is_empty());
}

#[tokio::test]
async fn gate_rejects_regardless_of_payload_validity() {
    let (_store, app) = gated_app();
    let (status, body) = post_json(&app, "/save", json!({ "bogus": true })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "SAVE_ERROR" }));
}

#[tokio::test]
async fn gate_admits_matching_cookie() {
    let (store, app) = gated_app();
    let (status, body) = post_json_with(
        &app,
        "/save",
        sample_doc(),
        &[("cookie", "theme=dark; editor=s3cret")],
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{:?}", body);
    let id = body["data"]["id"].as_str().unwrap();
    assert!(store.exists(id).unwrap());
}

#[tokio::test]
async fn gate_does_not_affect_reads() {
    let (store, app) = gated_app();
    store.write("open", &serde_json::from_value(sample_doc()).unwrap()).unwrap();
    let (status, body) = get_json(&app, "/data/open.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, sample_doc());
}
