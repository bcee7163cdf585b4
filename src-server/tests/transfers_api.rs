mod common;

use axum::http::StatusCode;
use common::{assert_field_error, assert_non_field_error, spawn_app};
use serde_json::{json, Value};

struct Fixture {
    app: common::TestApp,
    token: String,
    budget_id: String,
    period_id: String,
    deposit_id: String,
    entity_id: String,
    income_category: String,
    expense_category: String,
}

async fn setup() -> Fixture {
    let app = spawn_app().await;
    let token = app.register_and_login("owner@example.com").await;
    let budget_id = app.create_budget(&token, "Household").await;
    let period_id = app
        .create_period(&token, &budget_id, "2026-01", "2026-01-01", "2026-01-31")
        .await;
    let deposit_id = app.create_entity(&token, &budget_id, "Checking", true).await;
    let entity_id = app.create_entity(&token, &budget_id, "Supermarket", false).await;
    let income_category = app
        .create_category(&token, &budget_id, "Salary", "INCOME", 201)
        .await;
    let expense_category = app
        .create_category(&token, &budget_id, "Groceries", "EXPENSE", 101)
        .await;
    Fixture {
        app,
        token,
        budget_id,
        period_id,
        deposit_id,
        entity_id,
        income_category,
        expense_category,
    }
}

impl Fixture {
    fn payload(&self) -> Value {
        json!({
            "periodId": self.period_id,
            "name": "Weekly shopping",
            "value": "120.50",
            "date": "2026-01-10",
            "transferType": "EXPENSE",
            "depositId": self.deposit_id,
            "entityId": self.entity_id,
            "categoryId": self.expense_category
        })
    }

    async fn post_transfer(&self, payload: Value) -> (StatusCode, Value) {
        self.app
            .request(
                "POST",
                &format!("/api/v1/budgets/{}/transfers", self.budget_id),
                Some(&self.token),
                Some(payload),
            )
            .await
    }
}

#[tokio::test]
async fn create_and_list_transfers() {
    let f = setup().await;
    let (status, body) = f.post_transfer(f.payload()).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["value"].as_str(), Some("120.50"));

    let (status, body) = f
        .app
        .request(
            "GET",
            &format!("/api/v1/budgets/{}/transfers", f.budget_id),
            Some(&f.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(1));
}

#[tokio::test]
async fn transfer_value_must_be_positive() {
    let f = setup().await;
    let mut payload = f.payload();
    payload["value"] = json!("0");
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "value", "Value should be higher than 0.00.");

    let mut payload = f.payload();
    payload["value"] = json!("not-a-number");
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "value", "A valid number is required.");
}

#[tokio::test]
async fn unknown_period_is_an_invalid_pk() {
    let f = setup().await;
    let mut payload = f.payload();
    payload["periodId"] = json!("missing-period");
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(
        &body,
        "period",
        "Invalid pk \"missing-period\" - object does not exist.",
    );
}

#[tokio::test]
async fn deposit_must_be_a_deposit_entity() {
    let f = setup().await;
    let mut payload = f.payload();
    payload["depositId"] = json!(f.entity_id);
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "deposit", "Provided entity is not a deposit.");
}

#[tokio::test]
async fn deposit_and_entity_must_differ() {
    let f = setup().await;
    let mut payload = f.payload();
    payload["entityId"] = json!(f.deposit_id);
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_non_field_error(
        &body,
        "'deposit' and 'entity' fields cannot contain the same value.",
    );
}

#[tokio::test]
async fn category_type_must_match_transfer_type() {
    let f = setup().await;
    let mut payload = f.payload();
    payload["categoryId"] = json!(f.income_category);
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "category", "Invalid TransferCategory for Expense provided.");
}

#[tokio::test]
async fn references_must_belong_to_the_budget() {
    let f = setup().await;
    let other_budget = f.app.create_budget(&f.token, "Other").await;
    let foreign_deposit = f
        .app
        .create_entity(&f.token, &other_budget, "Foreign", true)
        .await;

    let mut payload = f.payload();
    payload["depositId"] = json!(foreign_deposit);
    let (status, body) = f.post_transfer(payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "deposit", "Deposit from different Budget.");
}

#[tokio::test]
async fn transfers_can_be_filtered_by_type() {
    let f = setup().await;
    f.post_transfer(f.payload()).await;
    let mut income = f.payload();
    income["name"] = json!("Salary");
    income["transferType"] = json!("INCOME");
    income["categoryId"] = json!(f.income_category);
    income["entityId"] = Value::Null;
    let (status, body) = f.post_transfer(income).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = f
        .app
        .request(
            "GET",
            &format!(
                "/api/v1/budgets/{}/transfers?transferType=INCOME",
                f.budget_id
            ),
            Some(&f.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64(), Some(1));
    assert_eq!(body["results"][0]["name"].as_str(), Some("Salary"));
}

#[tokio::test]
async fn update_replaces_and_delete_removes() {
    let f = setup().await;
    let (_, created) = f.post_transfer(f.payload()).await;
    let transfer_id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/budgets/{}/transfers/{transfer_id}", f.budget_id);

    let mut payload = f.payload();
    payload["value"] = json!("99.99");
    let (status, body) = f.app.request("PUT", &uri, Some(&f.token), Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["value"].as_str(), Some("99.99"));

    let (status, _) = f.app.request("DELETE", &uri, Some(&f.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = f.app.request("GET", &uri, Some(&f.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
