use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::Paginated};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use homebudget_core::entities::{Entity, EntityFilters, EntityUpdate, NewEntity};

async fn list_entities(
    Path(budget_id): Path<String>,
    Query(filters): Query<EntityFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<Entity>>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let entities = state.entity_service.list_entities(&budget_id, &filters)?;
    Ok(Json(entities.into()))
}

async fn list_deposits(
    Path(budget_id): Path<String>,
    Query(filters): Query<EntityFilters>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<Entity>>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let deposits = state.entity_service.list_deposits(&budget_id, &filters)?;
    Ok(Json(deposits.into()))
}

async fn create_entity(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewEntity>,
) -> ApiResult<(StatusCode, Json<Entity>)> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let entity = state.entity_service.create_entity(&budget_id, payload).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

async fn get_entity(
    Path((budget_id, entity_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Entity>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let entity = state.entity_service.get_entity(&budget_id, &entity_id)?;
    Ok(Json(entity))
}

async fn update_entity(
    Path((budget_id, entity_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<EntityUpdate>,
) -> ApiResult<Json<Entity>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let entity = state
        .entity_service
        .update_entity(&budget_id, &entity_id, payload)
        .await?;
    Ok(Json(entity))
}

async fn delete_entity(
    Path((budget_id, entity_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    state.entity_service.delete_entity(&budget_id, &entity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budgets/{id}/entities",
            get(list_entities).post(create_entity),
        )
        .route(
            "/budgets/{id}/entities/{eid}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .route("/budgets/{id}/deposits", get(list_deposits))
}
