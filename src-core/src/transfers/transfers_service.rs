use crate::errors::Result;
use crate::transfers::transfers_model::{
    NewTransfer, Transfer, TransferFilters, TransferUpdate,
};
use crate::transfers::transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct TransferService {
    repository: Arc<dyn TransferRepositoryTrait>,
}

impl TransferService {
    pub fn new(repository: Arc<dyn TransferRepositoryTrait>) -> Self {
        TransferService { repository }
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    fn list_transfers(
        &self,
        budget_id: &str,
        filters: &TransferFilters,
    ) -> Result<Vec<Transfer>> {
        self.repository.list(budget_id, filters)
    }

    fn get_transfer(&self, budget_id: &str, transfer_id: &str) -> Result<Transfer> {
        self.repository.find(budget_id, transfer_id)
    }

    async fn create_transfer(
        &self,
        budget_id: &str,
        new_transfer: NewTransfer,
    ) -> Result<Transfer> {
        self.repository.create(budget_id, new_transfer).await
    }

    async fn update_transfer(
        &self,
        budget_id: &str,
        transfer_id: &str,
        update: TransferUpdate,
    ) -> Result<Transfer> {
        self.repository.update(budget_id, transfer_id, update).await
    }

    async fn delete_transfer(&self, budget_id: &str, transfer_id: &str) -> Result<()> {
        self.repository.delete(budget_id, transfer_id).await?;
        Ok(())
    }
}
