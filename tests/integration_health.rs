#![allow(clippy::unwrap_used, clippy::panic, clippy::todo, clippy::clone_on_ref_ptr, unreachable_pub)]
use reqwest::StatusCode;
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_livez() {
    let (app, _store) = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/livez", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_happy_path() {
    let (app, _store) = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "ok");
}

#[tokio::test]
async fn test_readyz_storage_error() {
    let app = common::TestApp::spawn_with_store(Arc::new(common::FailingStore::default())).await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["storage"], "error");
}

#[tokio::test]
async fn test_readyz_storage_timeout() {
    let app = common::TestApp::spawn_with_store(Arc::new(common::SlowStore)).await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["storage"], "error");
}

#[tokio::test]
async fn test_health_routes_not_on_public_router() {
    let (app, _store) = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/readyz", app.server_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
