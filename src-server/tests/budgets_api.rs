mod common;

use axum::http::StatusCode;
use common::{assert_field_error, spawn_app};
use serde_json::json;

#[tokio::test]
async fn create_and_list_budgets() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    app.create_budget(&token, "Household").await;
    app.create_budget(&token, "Vacation").await;

    let (status, body) = app.request("GET", "/api/v1/budgets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(2));
    assert_eq!(body["results"][0]["name"].as_str(), Some("Household"));
    assert_eq!(body["results"][1]["name"].as_str(), Some("Vacation"));
}

#[tokio::test]
async fn duplicate_budget_name_per_owner_is_rejected() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    app.create_budget(&token, "Household").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "name": "Household", "currency": "USD" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(
        &body,
        "name",
        "Budget with given name already exists for this owner.",
    );
}

#[tokio::test]
async fn missing_budget_is_404() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let (status, body) = app
        .request("GET", "/api/v1/budgets/no-such-budget", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"].as_str(), Some("Not found."));
}

#[tokio::test]
async fn non_member_gets_403() {
    let app = spawn_app().await;
    let owner_token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&owner_token, "Household").await;

    let other_token = app.register_and_login("other@example.com").await;
    let (status, body) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}"),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["detail"].as_str(),
        Some("User does not have access to Budget.")
    );
}

#[tokio::test]
async fn member_gains_access_and_only_owner_manages_members() {
    let app = spawn_app().await;
    let owner_token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&owner_token, "Household").await;

    let member_token = app.register_and_login("member@example.com").await;
    let (_, member) = app.request("GET", "/api/v1/me", Some(&member_token), None).await;
    let member_id = member["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/members/{member_id}"),
            Some(&owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}"),
            Some(&member_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // A member is not allowed to manage the membership list.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/members/{member_id}"),
            Some(&member_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"].as_str(), Some("User is not an owner of Budget."));

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/budgets/{budget_id}/members/{member_id}"),
            Some(&owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            "GET",
            &format!("/api/v1/budgets/{budget_id}"),
            Some(&member_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn budget_delete_is_owner_only() {
    let app = spawn_app().await;
    let owner_token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&owner_token, "Household").await;

    let member_token = app.register_and_login("member@example.com").await;
    let (_, member) = app.request("GET", "/api/v1/me", Some(&member_token), None).await;
    let member_id = member["id"].as_str().unwrap();
    app.request(
        "POST",
        &format!("/api/v1/budgets/{budget_id}/members/{member_id}"),
        Some(&owner_token),
        None,
    )
    .await;

    let (status, body) = app
        .request(
            "DELETE",
            &format!("/api/v1/budgets/{budget_id}"),
            Some(&member_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"].as_str(), Some("User is not an owner of Budget."));

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/budgets/{budget_id}"),
            Some(&owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
