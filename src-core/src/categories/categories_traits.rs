use crate::categories::categories_model::{
    Category, CategoryFilters, CategoryUpdate, NewCategory,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn list(&self, budget_id: &str, filters: &CategoryFilters) -> Result<Vec<Category>>;
    fn find(&self, budget_id: &str, category_id: &str) -> Result<Category>;
    async fn create(&self, budget_id: &str, new_category: NewCategory) -> Result<Category>;
    async fn update(
        &self,
        budget_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;
    async fn delete(&self, budget_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn list_categories(&self, budget_id: &str, filters: &CategoryFilters)
        -> Result<Vec<Category>>;
    fn get_category(&self, budget_id: &str, category_id: &str) -> Result<Category>;
    async fn create_category(&self, budget_id: &str, new_category: NewCategory)
        -> Result<Category>;
    async fn update_category(
        &self,
        budget_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;
    async fn delete_category(&self, budget_id: &str, category_id: &str) -> Result<()>;
}
