#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use homebudget_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    _tmp: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        jwt_secret: "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=".to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _tmp: tmp,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn register_and_login(&self, email: &str) -> String {
        let (status, _) = self
            .request(
                "POST",
                "/api/v1/auth/register",
                None,
                Some(json!({ "email": email, "name": "Test user", "password": "s3cret-pass" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": "s3cret-pass" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["accessToken"].as_str().unwrap().to_string()
    }

    pub async fn create_budget(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/v1/budgets",
                Some(token),
                Some(json!({ "name": name, "currency": "USD" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_period(
        &self,
        token: &str,
        budget_id: &str,
        name: &str,
        date_start: &str,
        date_end: &str,
    ) -> String {
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/v1/budgets/{budget_id}/periods"),
                Some(token),
                Some(json!({ "name": name, "dateStart": date_start, "dateEnd": date_end })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_category(
        &self,
        token: &str,
        budget_id: &str,
        name: &str,
        category_type: &str,
        priority: i64,
    ) -> String {
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/v1/budgets/{budget_id}/categories"),
                Some(token),
                Some(json!({ "name": name, "categoryType": category_type, "priority": priority })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_entity(
        &self,
        token: &str,
        budget_id: &str,
        name: &str,
        is_deposit: bool,
    ) -> String {
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/v1/budgets/{budget_id}/entities"),
                Some(token),
                Some(json!({ "name": name, "isDeposit": is_deposit })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}

/// Asserts a DRF-style field error body: `{"detail": {field: [message]}}`.
pub fn assert_field_error(body: &Value, field: &str, message: &str) {
    assert_eq!(body["detail"][field][0].as_str(), Some(message), "{body}");
}

pub fn assert_non_field_error(body: &Value, message: &str) {
    assert_field_error(body, "non_field_errors", message);
}
