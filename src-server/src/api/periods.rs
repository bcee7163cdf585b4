use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::Paginated};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use homebudget_core::periods::{
    status_choices as core_status_choices, NewPeriod, Period, PeriodUpdate, PeriodWithSums,
    StatusChoice,
};

pub async fn status_choices() -> Json<Paginated<StatusChoice>> {
    Json(core_status_choices().into())
}

async fn list_periods(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<PeriodWithSums>>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let periods = state.period_service.list_periods(&budget_id)?;
    Ok(Json(periods.into()))
}

async fn create_period(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewPeriod>,
) -> ApiResult<(StatusCode, Json<Period>)> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let period = state.period_service.create_period(&budget_id, payload).await?;
    Ok((StatusCode::CREATED, Json(period)))
}

async fn get_period(
    Path((budget_id, period_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Period>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let period = state.period_service.get_period(&budget_id, &period_id)?;
    Ok(Json(period))
}

async fn update_period(
    Path((budget_id, period_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PeriodUpdate>,
) -> ApiResult<Json<Period>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let period = state
        .period_service
        .update_period(&budget_id, &period_id, payload)
        .await?;
    Ok(Json(period))
}

async fn delete_period(
    Path((budget_id, period_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    state.period_service.delete_period(&budget_id, &period_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budgets/{id}/periods",
            get(list_periods).post(create_period),
        )
        .route(
            "/budgets/{id}/periods/{pid}",
            get(get_period).patch(update_period).delete(delete_period),
        )
}
