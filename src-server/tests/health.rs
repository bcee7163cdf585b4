mod common;

use axum::http::StatusCode;
use common::spawn_app;

#[tokio::test]
async fn healthz_works() {
    let app = spawn_app().await;
    let (status, _) = app.request("GET", "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn readyz_works() {
    let app = spawn_app().await;
    let (status, _) = app.request("GET", "/api/v1/readyz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = spawn_app().await;
    let (status, body) = app.request("GET", "/api/v1/budgets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["detail"].as_str(),
        Some("Authentication credentials were not provided.")
    );

    let (status, body) = app
        .request("GET", "/api/v1/budgets", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"].as_str(), Some("Invalid token."));
}
