use crate::budgets::budgets_model::{Budget, BudgetUpdate, NewBudget};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub const NO_ACCESS_MESSAGE: &str = "User does not have access to Budget.";
pub const NOT_OWNER_MESSAGE: &str = "User is not an owner of Budget.";

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn ensure_access(&self, budget_id: &str, user_id: &str) -> Result<Budget> {
        let budget = self.repository.find_by_id(budget_id)?;
        if budget.owner_id == user_id || self.repository.is_member(budget_id, user_id)? {
            Ok(budget)
        } else {
            Err(Error::Forbidden(NO_ACCESS_MESSAGE.to_string()))
        }
    }

    fn ensure_owner(&self, budget_id: &str, user_id: &str) -> Result<Budget> {
        let budget = self.ensure_access(budget_id, user_id)?;
        if budget.owner_id != user_id {
            return Err(Error::Forbidden(NOT_OWNER_MESSAGE.to_string()));
        }
        Ok(budget)
    }

    fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.repository.list_for_user(user_id)
    }

    fn get_budget(&self, budget_id: &str, user_id: &str) -> Result<Budget> {
        self.ensure_access(budget_id, user_id)
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        let new_budget = NewBudget {
            owner_id: Some(user_id.to_string()),
            ..new_budget
        };
        self.repository.create(new_budget).await
    }

    async fn update_budget(
        &self,
        budget_id: &str,
        user_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        self.ensure_access(budget_id, user_id)?;
        self.repository.update(budget_id, update).await
    }

    async fn delete_budget(&self, budget_id: &str, user_id: &str) -> Result<()> {
        self.ensure_owner(budget_id, user_id)?;
        self.repository.delete(budget_id).await?;
        Ok(())
    }

    async fn add_member(&self, budget_id: &str, owner_id: &str, user_id: &str) -> Result<()> {
        self.ensure_owner(budget_id, owner_id)?;
        self.repository.add_member(budget_id, user_id).await
    }

    async fn remove_member(&self, budget_id: &str, owner_id: &str, user_id: &str) -> Result<()> {
        self.ensure_owner(budget_id, owner_id)?;
        self.repository.remove_member(budget_id, user_id).await?;
        Ok(())
    }
}
