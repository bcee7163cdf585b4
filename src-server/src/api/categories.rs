use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::Paginated};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use homebudget_core::categories::{Category, CategoryFilters, CategoryUpdate, NewCategory};

async fn list_categories(
    Path(budget_id): Path<String>,
    Query(filters): Query<CategoryFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<Category>>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let categories = state.category_service.list_categories(&budget_id, &filters)?;
    Ok(Json(categories.into()))
}

async fn create_category(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let category = state
        .category_service
        .create_category(&budget_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(
    Path((budget_id, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Category>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let category = state.category_service.get_category(&budget_id, &category_id)?;
    Ok(Json(category))
}

async fn update_category(
    Path((budget_id, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let category = state
        .category_service
        .update_category(&budget_id, &category_id, payload)
        .await?;
    Ok(Json(category))
}

async fn delete_category(
    Path((budget_id, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    state
        .category_service
        .delete_category(&budget_id, &category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budgets/{id}/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/budgets/{id}/categories/{cid}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
