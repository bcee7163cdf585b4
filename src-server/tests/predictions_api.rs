mod common;

use axum::http::StatusCode;
use common::{assert_field_error, assert_non_field_error, spawn_app, TestApp};
use serde_json::json;

async fn activate(app: &TestApp, token: &str, budget_id: &str, period_id: &str) {
    let (status, body) = app
        .request(
            "PATCH",
            &format!("/api/v1/budgets/{budget_id}/periods/{period_id}"),
            Some(token),
            Some(json!({ "status": "ACTIVE" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

async fn close(app: &TestApp, token: &str, budget_id: &str, period_id: &str) {
    activate(app, token, budget_id, period_id).await;
    let (status, body) = app
        .request(
            "PATCH",
            &format!("/api/v1/budgets/{budget_id}/periods/{period_id}"),
            Some(token),
            Some(json!({ "status": "CLOSED" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn predictions_are_only_created_in_draft_periods() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let category = app
        .create_category(&token, &budget_id, "Groceries", "EXPENSE", 101)
        .await;
    let period_id = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;
    let uri = format!("/api/v1/budgets/{budget_id}/periods/{period_id}/predictions");

    let (status, body) = app
        .request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "categoryId": category, "currentPlan": "300" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert!(body["initialPlan"].is_null());

    activate(&app, &token, &budget_id, &period_id).await;
    let (status, body) = app
        .request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "currentPlan": "50" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_non_field_error(
        &body,
        "New Expense Prediction cannot be added to active Budgeting Period.",
    );
}

#[tokio::test]
async fn prediction_category_must_be_an_expense_of_the_budget() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let income = app
        .create_category(&token, &budget_id, "Salary", "INCOME", 201)
        .await;
    let period_id = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/periods/{period_id}/predictions"),
            Some(&token),
            Some(json!({ "categoryId": income, "currentPlan": "300" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(
        &body,
        "category",
        "Incorrect category provided. Please provide expense category.",
    );
}

#[tokio::test]
async fn prediction_plan_must_be_positive() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let period_id = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/periods/{period_id}/predictions"),
            Some(&token),
            Some(json!({ "currentPlan": "-5" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "current_plan", "Value should be higher than 0.00.");
}

#[tokio::test]
async fn prediction_period_cannot_change_and_closed_period_is_immutable() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let category = app
        .create_category(&token, &budget_id, "Groceries", "EXPENSE", 101)
        .await;
    let period_id = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;

    let (_, created) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/periods/{period_id}/predictions"),
            Some(&token),
            Some(json!({ "categoryId": category, "currentPlan": "300" })),
        )
        .await;
    let prediction_id = created["id"].as_str().unwrap();
    let uri =
        format!("/api/v1/budgets/{budget_id}/periods/{period_id}/predictions/{prediction_id}");

    let (status, body) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "periodId": "another" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_non_field_error(
        &body,
        "Budgeting Period for Expense Prediction cannot be changed.",
    );

    let (status, body) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "currentPlan": "350" })))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["currentPlan"].as_str(), Some("350"));

    close(&app, &token, &budget_id, &period_id).await;
    let (status, body) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "currentPlan": "400" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_non_field_error(
        &body,
        "Expense Prediction cannot be changed when Budgeting Period is closed.",
    );
}

#[tokio::test]
async fn copy_predictions_from_previous_period() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let category = app
        .create_category(&token, &budget_id, "Groceries", "EXPENSE", 101)
        .await;
    let january = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;
    app.request(
        "POST",
        &format!("/api/v1/budgets/{budget_id}/periods/{january}/predictions"),
        Some(&token),
        Some(json!({ "categoryId": category, "currentPlan": "300", "description": "food" })),
    )
    .await;
    close(&app, &token, &budget_id, &january).await;

    let february = app
        .create_period(&token, &budget_id, "2026-02", "2026-02-01", "2026-02-28")
        .await;
    let copy_uri = format!("/api/v1/budgets/{budget_id}/periods/{february}/predictions/copy");

    let (status, body) = app.request("POST", &copy_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["count"].as_u64(), Some(1));
    let copied = &body["results"][0];
    assert_eq!(copied["currentPlan"].as_str(), Some("300"));
    assert_eq!(copied["description"].as_str(), Some("food"));
    assert!(copied["initialPlan"].is_null());

    // A second copy is rejected because the target now has predictions.
    let (status, body) = app.request("POST", &copy_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_non_field_error(
        &body,
        "Can not copy Predictions from previous Period if any Prediction for current Period exists.",
    );
}

#[tokio::test]
async fn copy_without_previous_predictions_is_rejected() {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let period_id = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/budgets/{budget_id}/periods/{period_id}/predictions/copy"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_non_field_error(&body, "No predictions to copy from previous Period.");
}
