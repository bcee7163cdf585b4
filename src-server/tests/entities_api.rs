mod common;

use axum::http::StatusCode;
use common::{assert_field_error, spawn_app};
use serde_json::json;

#[tokio::test]
async fn entities_and_deposits_are_listed_separately() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    app.create_entity(&token, &budget_id, "Checking", true).await;
    app.create_entity(&token, &budget_id, "Supermarket", false).await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}/entities"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(2));

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}/deposits"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(1));
    assert_eq!(body["results"][0]["name"].as_str(), Some("Checking"));
    assert_eq!(body["results"][0]["isDeposit"].as_bool(), Some(true));
}

#[tokio::test]
async fn entity_names_are_unique_per_budget() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    app.create_entity(&token, &budget_id, "Checking", true).await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/entities"),
            Some(&token),
            Some(json!({ "name": "Checking" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "name", "Entity with given name already exists in Budget.");
}

#[tokio::test]
async fn entities_can_be_filtered_by_name_and_activity() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    app.create_entity(&token, &budget_id, "Supermarket", false).await;
    let inactive = app.create_entity(&token, &budget_id, "Old shop", false).await;
    app.request(
        "PUT",
        &format!("/api/v1/budgets/{budget_id}/entities/{inactive}"),
        Some(&token),
        Some(json!({ "name": "Old shop", "isActive": false, "isDeposit": false })),
    )
    .await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}/entities?isActive=true"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(1));

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}/entities?name=market"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(1));
    assert_eq!(body["results"][0]["name"].as_str(), Some("Supermarket"));
}

#[tokio::test]
async fn entity_from_another_budget_is_404() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let other_budget = app.create_budget(&token, "Other").await;
    let entity_id = app.create_entity(&token, &other_budget, "Checking", true).await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}/entities/{entity_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"].as_str(), Some("Not found."));
}
