use crate::budgets::budgets_model::{Budget, BudgetUpdate, NewBudget};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn find_by_id(&self, budget_id: &str) -> Result<Budget>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn is_member(&self, budget_id: &str, user_id: &str) -> Result<bool>;
    fn member_ids(&self, budget_id: &str) -> Result<Vec<String>>;
    async fn create(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update(&self, budget_id: &str, update: BudgetUpdate) -> Result<Budget>;
    async fn delete(&self, budget_id: &str) -> Result<usize>;
    async fn add_member(&self, budget_id: &str, user_id: &str) -> Result<()>;
    async fn remove_member(&self, budget_id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Returns the budget when the user is its owner or a member.
    /// Not found and no-access cases map to 404/403 at the API edge.
    fn ensure_access(&self, budget_id: &str, user_id: &str) -> Result<Budget>;
    /// Like `ensure_access` but additionally requires ownership.
    fn ensure_owner(&self, budget_id: &str, user_id: &str) -> Result<Budget>;

    fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn get_budget(&self, budget_id: &str, user_id: &str) -> Result<Budget>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        budget_id: &str,
        user_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;
    async fn delete_budget(&self, budget_id: &str, user_id: &str) -> Result<()>;
    async fn add_member(&self, budget_id: &str, owner_id: &str, user_id: &str) -> Result<()>;
    async fn remove_member(&self, budget_id: &str, owner_id: &str, user_id: &str) -> Result<()>;
}
