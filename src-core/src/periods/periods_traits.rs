use crate::errors::Result;
use crate::periods::periods_model::{NewPeriod, Period, PeriodUpdate, PeriodWithSums};
use async_trait::async_trait;

/// Trait for period repository operations
#[async_trait]
pub trait PeriodRepositoryTrait: Send + Sync {
    fn list(&self, budget_id: &str) -> Result<Vec<Period>>;
    fn list_with_sums(&self, budget_id: &str) -> Result<Vec<PeriodWithSums>>;
    fn find(&self, budget_id: &str, period_id: &str) -> Result<Period>;
    async fn create(&self, budget_id: &str, new_period: NewPeriod) -> Result<Period>;
    async fn update(&self, budget_id: &str, period_id: &str, update: PeriodUpdate)
        -> Result<Period>;
    async fn delete(&self, budget_id: &str, period_id: &str) -> Result<usize>;
}

/// Trait for period service operations
#[async_trait]
pub trait PeriodServiceTrait: Send + Sync {
    fn list_periods(&self, budget_id: &str) -> Result<Vec<PeriodWithSums>>;
    fn get_period(&self, budget_id: &str, period_id: &str) -> Result<Period>;
    async fn create_period(&self, budget_id: &str, new_period: NewPeriod) -> Result<Period>;
    async fn update_period(
        &self,
        budget_id: &str,
        period_id: &str,
        update: PeriodUpdate,
    ) -> Result<Period>;
    async fn delete_period(&self, budget_id: &str, period_id: &str) -> Result<()>;
}
