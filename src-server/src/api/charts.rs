use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use homebudget_core::charts::{
    CategoriesChartFilters, DepositsChartFilters, SeriesChart, TransfersChart,
    TransfersChartFilters,
};

async fn transfers_in_periods(
    Path(budget_id): Path<String>,
    Query(filters): Query<TransfersChartFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<TransfersChart>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let chart = state.charts_service.transfers_in_periods(&budget_id, &filters)?;
    Ok(Json(chart))
}

async fn categories_in_periods(
    Path(budget_id): Path<String>,
    Query(filters): Query<CategoriesChartFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<SeriesChart>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let chart = state
        .charts_service
        .categories_in_periods(&budget_id, &filters)?;
    Ok(Json(chart))
}

async fn deposits_in_periods(
    Path(budget_id): Path<String>,
    Query(filters): Query<DepositsChartFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<SeriesChart>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let chart = state.charts_service.deposits_in_periods(&budget_id, &filters)?;
    Ok(Json(chart))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budgets/{id}/charts/transfers-in-periods",
            get(transfers_in_periods),
        )
        .route(
            "/budgets/{id}/charts/categories-in-periods",
            get(categories_in_periods),
        )
        .route(
            "/budgets/{id}/charts/deposits-in-periods",
            get(deposits_in_periods),
        )
}
