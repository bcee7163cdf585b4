use crate::errors::Result;
use crate::predictions::predictions_model::{NewPrediction, Prediction, PredictionUpdate};
use async_trait::async_trait;

/// Trait for expense prediction repository operations
#[async_trait]
pub trait PredictionRepositoryTrait: Send + Sync {
    fn list(&self, budget_id: &str, period_id: &str) -> Result<Vec<Prediction>>;
    fn find(&self, budget_id: &str, period_id: &str, prediction_id: &str) -> Result<Prediction>;
    async fn create(
        &self,
        budget_id: &str,
        period_id: &str,
        new_prediction: NewPrediction,
    ) -> Result<Prediction>;
    async fn update(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
        update: PredictionUpdate,
    ) -> Result<Prediction>;
    async fn delete(&self, budget_id: &str, period_id: &str, prediction_id: &str)
        -> Result<usize>;
    async fn copy_from_previous(
        &self,
        budget_id: &str,
        period_id: &str,
    ) -> Result<Vec<Prediction>>;
}

/// Trait for expense prediction service operations
#[async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    fn list_predictions(&self, budget_id: &str, period_id: &str) -> Result<Vec<Prediction>>;
    fn get_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
    ) -> Result<Prediction>;
    async fn create_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        new_prediction: NewPrediction,
    ) -> Result<Prediction>;
    async fn update_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
        update: PredictionUpdate,
    ) -> Result<Prediction>;
    async fn delete_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
    ) -> Result<()>;
    async fn copy_predictions_from_previous(
        &self,
        budget_id: &str,
        period_id: &str,
    ) -> Result<Vec<Prediction>>;
}
