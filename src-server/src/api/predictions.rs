use std::sync::Arc;

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::Paginated,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use homebudget_core::errors::Error as CoreError;
use homebudget_core::predictions::{NewPrediction, Prediction, PredictionUpdate};

async fn list_predictions(
    Path((budget_id, period_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Paginated<Prediction>>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let predictions = state.prediction_service.list_predictions(&budget_id, &period_id)?;
    Ok(Json(predictions.into()))
}

async fn create_prediction(
    Path((budget_id, period_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewPrediction>,
) -> ApiResult<(StatusCode, Json<Prediction>)> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let prediction = state
        .prediction_service
        .create_prediction(&budget_id, &period_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(prediction)))
}

async fn get_prediction(
    Path((budget_id, period_id, prediction_id)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Prediction>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let prediction =
        state
            .prediction_service
            .get_prediction(&budget_id, &period_id, &prediction_id)?;
    Ok(Json(prediction))
}

async fn update_prediction(
    Path((budget_id, period_id, prediction_id)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PredictionUpdate>,
) -> ApiResult<Json<Prediction>> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let prediction = state
        .prediction_service
        .update_prediction(&budget_id, &period_id, &prediction_id, payload)
        .await?;
    Ok(Json(prediction))
}

async fn delete_prediction(
    Path((budget_id, period_id, prediction_id)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    state
        .prediction_service
        .delete_prediction(&budget_id, &period_id, &prediction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn copy_predictions(
    Path((budget_id, period_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<(StatusCode, Json<Paginated<Prediction>>)> {
    state.budget_service.ensure_access(&budget_id, &user.0)?;
    let copied = state
        .prediction_service
        .copy_predictions_from_previous(&budget_id, &period_id)
        .await
        .map_err(|err| match err {
            CoreError::Validation(_) | CoreError::NotFound(_) | CoreError::Forbidden(_) => {
                ApiError::Core(err)
            }
            _ => ApiError::Internal(
                "Unexpected error raised on copying Predictions from previous Period.".to_string(),
            ),
        })?;
    Ok((StatusCode::CREATED, Json(copied.into())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budgets/{id}/periods/{pid}/predictions",
            get(list_predictions).post(create_prediction),
        )
        .route(
            "/budgets/{id}/periods/{pid}/predictions/copy",
            post(copy_predictions),
        )
        .route(
            "/budgets/{id}/periods/{pid}/predictions/{prid}",
            get(get_prediction)
                .patch(update_prediction)
                .delete(delete_prediction),
        )
}
