use crate::categories::categories_model::{
    Category, CategoryFilters, CategoryUpdate, NewCategory,
};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn list_categories(
        &self,
        budget_id: &str,
        filters: &CategoryFilters,
    ) -> Result<Vec<Category>> {
        self.repository.list(budget_id, filters)
    }

    fn get_category(&self, budget_id: &str, category_id: &str) -> Result<Category> {
        self.repository.find(budget_id, category_id)
    }

    async fn create_category(
        &self,
        budget_id: &str,
        new_category: NewCategory,
    ) -> Result<Category> {
        self.repository.create(budget_id, new_category).await
    }

    async fn update_category(
        &self,
        budget_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        self.repository.update(budget_id, category_id, update).await
    }

    async fn delete_category(&self, budget_id: &str, category_id: &str) -> Result<()> {
        self.repository.delete(budget_id, category_id).await?;
        Ok(())
    }
}
