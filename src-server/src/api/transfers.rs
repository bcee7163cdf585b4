use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::Paginated};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use homebudget_core::transfers::{NewTransfer, Transfer, TransferFilters, TransferUpdate};

async fn list_transfers(
    Path(budget_id): Path<String>,
    Query(filters): Query<TransferFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<Transfer>>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let transfers = state.transfer_service.list_transfers(&budget_id, &filters)?;
    Ok(Json(transfers.into()))
}

async fn create_transfer(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewTransfer>,
) -> ApiResult<(StatusCode, Json<Transfer>)> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let transfer = state
        .transfer_service
        .create_transfer(&budget_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

async fn get_transfer(
    Path((budget_id, transfer_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Transfer>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let transfer = state.transfer_service.get_transfer(&budget_id, &transfer_id)?;
    Ok(Json(transfer))
}

async fn update_transfer(
    Path((budget_id, transfer_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<TransferUpdate>,
) -> ApiResult<Json<Transfer>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let transfer = state
        .transfer_service
        .update_transfer(&budget_id, &transfer_id, payload)
        .await?;
    Ok(Json(transfer))
}

async fn delete_transfer(
    Path((budget_id, transfer_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    state
        .transfer_service
        .delete_transfer(&budget_id, &transfer_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budgets/{id}/transfers",
            get(list_transfers).post(create_transfer),
        )
        .route(
            "/budgets/{id}/transfers/{tid}",
            get(get_transfer)
                .put(update_transfer)
                .delete(delete_transfer),
        )
}
