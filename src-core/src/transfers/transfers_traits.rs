use crate::errors::Result;
use crate::transfers::transfers_model::{
    NewTransfer, Transfer, TransferFilters, TransferUpdate,
};
use async_trait::async_trait;

/// Trait for transfer repository operations
#[async_trait]
pub trait TransferRepositoryTrait: Send + Sync {
    fn list(&self, budget_id: &str, filters: &TransferFilters) -> Result<Vec<Transfer>>;
    fn find(&self, budget_id: &str, transfer_id: &str) -> Result<Transfer>;
    async fn create(&self, budget_id: &str, new_transfer: NewTransfer) -> Result<Transfer>;
    async fn update(
        &self,
        budget_id: &str,
        transfer_id: &str,
        update: TransferUpdate,
    ) -> Result<Transfer>;
    async fn delete(&self, budget_id: &str, transfer_id: &str) -> Result<usize>;
}

/// Trait for transfer service operations
#[async_trait]
pub trait TransferServiceTrait: Send + Sync {
    fn list_transfers(&self, budget_id: &str, filters: &TransferFilters)
        -> Result<Vec<Transfer>>;
    fn get_transfer(&self, budget_id: &str, transfer_id: &str) -> Result<Transfer>;
    async fn create_transfer(&self, budget_id: &str, new_transfer: NewTransfer)
        -> Result<Transfer>;
    async fn update_transfer(
        &self,
        budget_id: &str,
        transfer_id: &str,
        update: TransferUpdate,
    ) -> Result<Transfer>;
    async fn delete_transfer(&self, budget_id: &str, transfer_id: &str) -> Result<()>;
}
