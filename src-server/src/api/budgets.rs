use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::Paginated};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use homebudget_core::budgets::{Budget, BudgetUpdate, NewBudget};

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<Budget>>> {
    let budgets = state.budget_service.list_budgets(&user.0)?;
    Ok(Json(budgets.into()))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let budget = state.budget_service.create_budget(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

async fn get_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.get_budget(&budget_id, &user.0)?;
    Ok(Json(budget))
}

async fn update_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .update_budget(&budget_id, &user.0, payload)
        .await?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&budget_id, &user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_member(
    Path((budget_id, user_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state
        .budget_service
        .add_member(&budget_id, &user.0, &user_id)
        .await?;
    Ok(StatusCode::CREATED)
}

async fn remove_member(
    Path((budget_id, user_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state
        .budget_service
        .remove_member(&budget_id, &user.0, &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route(
            "/budgets/{id}/members/{user_id}",
            post(add_member).delete(remove_member),
        )
}
