use crate::errors::Result;
use crate::predictions::predictions_model::{NewPrediction, Prediction, PredictionUpdate};
use crate::predictions::predictions_traits::{PredictionRepositoryTrait, PredictionServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct PredictionService {
    repository: Arc<dyn PredictionRepositoryTrait>,
}

impl PredictionService {
    pub fn new(repository: Arc<dyn PredictionRepositoryTrait>) -> Self {
        PredictionService { repository }
    }
}

#[async_trait]
impl PredictionServiceTrait for PredictionService {
    fn list_predictions(&self, budget_id: &str, period_id: &str) -> Result<Vec<Prediction>> {
        self.repository.list(budget_id, period_id)
    }

    fn get_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
    ) -> Result<Prediction> {
        self.repository.find(budget_id, period_id, prediction_id)
    }

    async fn create_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        new_prediction: NewPrediction,
    ) -> Result<Prediction> {
        self.repository
            .create(budget_id, period_id, new_prediction)
            .await
    }

    async fn update_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
        update: PredictionUpdate,
    ) -> Result<Prediction> {
        self.repository
            .update(budget_id, period_id, prediction_id, update)
            .await
    }

    async fn delete_prediction(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
    ) -> Result<()> {
        self.repository
            .delete(budget_id, period_id, prediction_id)
            .await?;
        Ok(())
    }

    async fn copy_predictions_from_previous(
        &self,
        budget_id: &str,
        period_id: &str,
    ) -> Result<Vec<Prediction>> {
        self.repository.copy_from_previous(budget_id, period_id).await
    }
}
