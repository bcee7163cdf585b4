use crate::entities::entities_model::{Entity, EntityFilters, EntityUpdate, NewEntity};
use crate::entities::entities_traits::{EntityRepositoryTrait, EntityServiceTrait};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub struct EntityService {
    repository: Arc<dyn EntityRepositoryTrait>,
}

impl EntityService {
    pub fn new(repository: Arc<dyn EntityRepositoryTrait>) -> Self {
        EntityService { repository }
    }
}

#[async_trait]
impl EntityServiceTrait for EntityService {
    fn list_entities(&self, budget_id: &str, filters: &EntityFilters) -> Result<Vec<Entity>> {
        self.repository.list(budget_id, filters)
    }

    fn list_deposits(&self, budget_id: &str, filters: &EntityFilters) -> Result<Vec<Entity>> {
        let filters = EntityFilters {
            is_deposit: Some(true),
            ..filters.clone()
        };
        self.repository.list(budget_id, &filters)
    }

    fn get_entity(&self, budget_id: &str, entity_id: &str) -> Result<Entity> {
        self.repository.find(budget_id, entity_id)
    }

    async fn create_entity(&self, budget_id: &str, new_entity: NewEntity) -> Result<Entity> {
        self.repository.create(budget_id, new_entity).await
    }

    async fn update_entity(
        &self,
        budget_id: &str,
        entity_id: &str,
        update: EntityUpdate,
    ) -> Result<Entity> {
        self.repository.update(budget_id, entity_id, update).await
    }

    async fn delete_entity(&self, budget_id: &str, entity_id: &str) -> Result<()> {
        self.repository.delete(budget_id, entity_id).await?;
        Ok(())
    }
}
