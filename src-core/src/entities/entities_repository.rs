use crate::db::{get_connection, WriteHandle};
use crate::entities::entities_model::{Entity, EntityFilters, EntityUpdate, NewEntity};
use crate::entities::entities_traits::EntityRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::schema::entities;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct EntityRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl EntityRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        EntityRepository { pool, writer }
    }
}

fn name_taken(
    conn: &mut SqliteConnection,
    budget_id: &str,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<bool> {
    let mut query = entities::table
        .filter(entities::budget_id.eq(budget_id))
        .filter(entities::name.eq(name))
        .into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(entities::id.ne(id.to_string()));
    }
    Ok(query.count().get_result::<i64>(conn)? > 0)
}

#[async_trait]
impl EntityRepositoryTrait for EntityRepository {
    fn list(&self, budget_id: &str, filters: &EntityFilters) -> Result<Vec<Entity>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = entities::table
            .filter(entities::budget_id.eq(budget_id))
            .order(entities::name.asc())
            .into_boxed();

        if let Some(is_deposit) = filters.is_deposit {
            query = query.filter(entities::is_deposit.eq(is_deposit));
        }
        if let Some(is_active) = filters.is_active {
            query = query.filter(entities::is_active.eq(is_active));
        }
        if let Some(name) = &filters.name {
            query = query.filter(entities::name.like(format!("%{name}%")));
        }

        Ok(query.load::<Entity>(&mut conn)?)
    }

    fn find(&self, budget_id: &str, entity_id: &str) -> Result<Entity> {
        let mut conn = get_connection(&self.pool)?;
        Ok(entities::table
            .filter(entities::id.eq(entity_id))
            .filter(entities::budget_id.eq(budget_id))
            .first::<Entity>(&mut conn)?)
    }

    async fn create(&self, budget_id: &str, new_entity: NewEntity) -> Result<Entity> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Entity> {
                if name_taken(conn, &budget_id, &new_entity.name, None)? {
                    return Err(ValidationError::field(
                        "name",
                        "Entity with given name already exists in Budget.",
                    ));
                }

                let now = Utc::now().to_rfc3339();
                let new_entity = NewEntity {
                    id: Some(Uuid::new_v4().to_string()),
                    budget_id: Some(budget_id),
                    is_active: Some(new_entity.is_active.unwrap_or(true)),
                    is_deposit: Some(new_entity.is_deposit.unwrap_or(false)),
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_entity
                };

                diesel::insert_into(entities::table)
                    .values(&new_entity)
                    .execute(conn)?;

                Ok(entities::table
                    .find(new_entity.id.as_deref().unwrap_or_default())
                    .first::<Entity>(conn)?)
            })
            .await
    }

    async fn update(
        &self,
        budget_id: &str,
        entity_id: &str,
        update: EntityUpdate,
    ) -> Result<Entity> {
        let budget_id = budget_id.to_string();
        let entity_id = entity_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Entity> {
                entities::table
                    .filter(entities::id.eq(&entity_id))
                    .filter(entities::budget_id.eq(&budget_id))
                    .first::<Entity>(conn)?;

                if name_taken(conn, &budget_id, &update.name, Some(&entity_id))? {
                    return Err(ValidationError::field(
                        "name",
                        "Entity with given name already exists in Budget.",
                    ));
                }

                diesel::update(entities::table.find(&entity_id))
                    .set((&update, entities::updated_at.eq(Utc::now().to_rfc3339())))
                    .execute(conn)?;

                Ok(entities::table.find(&entity_id).first::<Entity>(conn)?)
            })
            .await
    }

    async fn delete(&self, budget_id: &str, entity_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let entity_id = entity_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                entities::table
                    .filter(entities::id.eq(&entity_id))
                    .filter(entities::budget_id.eq(&budget_id))
                    .first::<Entity>(conn)?;
                Ok(diesel::delete(entities::table.find(&entity_id)).execute(conn)?)
            })
            .await
    }
}
