use crate::entities::entities_model::{Entity, EntityFilters, EntityUpdate, NewEntity};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for entity repository operations
#[async_trait]
pub trait EntityRepositoryTrait: Send + Sync {
    fn list(&self, budget_id: &str, filters: &EntityFilters) -> Result<Vec<Entity>>;
    fn find(&self, budget_id: &str, entity_id: &str) -> Result<Entity>;
    async fn create(&self, budget_id: &str, new_entity: NewEntity) -> Result<Entity>;
    async fn update(&self, budget_id: &str, entity_id: &str, update: EntityUpdate)
        -> Result<Entity>;
    async fn delete(&self, budget_id: &str, entity_id: &str) -> Result<usize>;
}

/// Trait for entity service operations
#[async_trait]
pub trait EntityServiceTrait: Send + Sync {
    fn list_entities(&self, budget_id: &str, filters: &EntityFilters) -> Result<Vec<Entity>>;
    fn list_deposits(&self, budget_id: &str, filters: &EntityFilters) -> Result<Vec<Entity>>;
    fn get_entity(&self, budget_id: &str, entity_id: &str) -> Result<Entity>;
    async fn create_entity(&self, budget_id: &str, new_entity: NewEntity) -> Result<Entity>;
    async fn update_entity(
        &self,
        budget_id: &str,
        entity_id: &str,
        update: EntityUpdate,
    ) -> Result<Entity>;
    async fn delete_entity(&self, budget_id: &str, entity_id: &str) -> Result<()>;
}
