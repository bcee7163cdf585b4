use crate::errors::Result;
use crate::periods::periods_model::{NewPeriod, Period, PeriodUpdate, PeriodWithSums};
use crate::periods::periods_traits::{PeriodRepositoryTrait, PeriodServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct PeriodService {
    repository: Arc<dyn PeriodRepositoryTrait>,
}

impl PeriodService {
    pub fn new(repository: Arc<dyn PeriodRepositoryTrait>) -> Self {
        PeriodService { repository }
    }
}

#[async_trait]
impl PeriodServiceTrait for PeriodService {
    fn list_periods(&self, budget_id: &str) -> Result<Vec<PeriodWithSums>> {
        self.repository.list_with_sums(budget_id)
    }

    fn get_period(&self, budget_id: &str, period_id: &str) -> Result<Period> {
        self.repository.find(budget_id, period_id)
    }

    async fn create_period(&self, budget_id: &str, new_period: NewPeriod) -> Result<Period> {
        self.repository.create(budget_id, new_period).await
    }

    async fn update_period(
        &self,
        budget_id: &str,
        period_id: &str,
        update: PeriodUpdate,
    ) -> Result<Period> {
        self.repository.update(budget_id, period_id, update).await
    }

    async fn delete_period(&self, budget_id: &str, period_id: &str) -> Result<()> {
        self.repository.delete(budget_id, period_id).await?;
        Ok(())
    }
}
