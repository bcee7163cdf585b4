use crate::categories::categories_model::{
    validate_type_and_priority, Category, CategoryFilters, CategoryUpdate, NewCategory,
};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{Result, ValidationError};
use crate::schema::categories;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

/// Name must be unique within the budget per type and per owner scope
/// (personal categories are scoped to their owner, common ones to the budget).
fn name_taken(
    conn: &mut SqliteConnection,
    budget_id: &str,
    name: &str,
    category_type: &str,
    owner_id: Option<&str>,
    exclude_id: Option<&str>,
) -> Result<Option<&'static str>> {
    let mut query = categories::table
        .filter(categories::budget_id.eq(budget_id))
        .filter(categories::name.eq(name))
        .filter(categories::category_type.eq(category_type))
        .into_boxed();
    query = match owner_id {
        Some(owner) => query.filter(categories::owner_id.eq(owner.to_string())),
        None => query.filter(categories::owner_id.is_null()),
    };
    if let Some(id) = exclude_id {
        query = query.filter(categories::id.ne(id.to_string()));
    }

    if query.count().get_result::<i64>(conn)? > 0 {
        Ok(Some(if owner_id.is_some() {
            "Personal TransferCategory with given name already exists in Budget."
        } else {
            "Common TransferCategory with given name already exists in Budget."
        }))
    } else {
        Ok(None)
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list(&self, budget_id: &str, filters: &CategoryFilters) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = categories::table
            .filter(categories::budget_id.eq(budget_id))
            .order((categories::priority.asc(), categories::name.asc()))
            .into_boxed();

        if let Some(category_type) = &filters.category_type {
            query = query.filter(categories::category_type.eq(category_type.clone()));
        }
        if let Some(is_active) = filters.is_active {
            query = query.filter(categories::is_active.eq(is_active));
        }
        if let Some(owner) = &filters.owner {
            query = query.filter(categories::owner_id.eq(owner.clone()));
        }

        Ok(query.load::<Category>(&mut conn)?)
    }

    fn find(&self, budget_id: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::budget_id.eq(budget_id))
            .first::<Category>(&mut conn)?)
    }

    async fn create(&self, budget_id: &str, new_category: NewCategory) -> Result<Category> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                validate_type_and_priority(&new_category.category_type, new_category.priority)?;
                if let Some(message) = name_taken(
                    conn,
                    &budget_id,
                    &new_category.name,
                    &new_category.category_type,
                    new_category.owner_id.as_deref(),
                    None,
                )? {
                    return Err(ValidationError::field("name", message));
                }

                let now = Utc::now().to_rfc3339();
                let new_category = NewCategory {
                    id: Some(Uuid::new_v4().to_string()),
                    budget_id: Some(budget_id),
                    is_active: Some(new_category.is_active.unwrap_or(true)),
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_category
                };

                diesel::insert_into(categories::table)
                    .values(&new_category)
                    .execute(conn)?;

                Ok(categories::table
                    .find(new_category.id.as_deref().unwrap_or_default())
                    .first::<Category>(conn)?)
            })
            .await
    }

    async fn update(
        &self,
        budget_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        let budget_id = budget_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                categories::table
                    .filter(categories::id.eq(&category_id))
                    .filter(categories::budget_id.eq(&budget_id))
                    .first::<Category>(conn)?;

                validate_type_and_priority(&update.category_type, update.priority)?;
                if let Some(message) = name_taken(
                    conn,
                    &budget_id,
                    &update.name,
                    &update.category_type,
                    update.owner_id.as_deref(),
                    Some(&category_id),
                )? {
                    return Err(ValidationError::field("name", message));
                }

                // Columns set one by one so a None owner/description clears the value
                diesel::update(categories::table.find(&category_id))
                    .set((
                        categories::name.eq(&update.name),
                        categories::description.eq(&update.description),
                        categories::owner_id.eq(&update.owner_id),
                        categories::category_type.eq(&update.category_type),
                        categories::priority.eq(update.priority),
                        categories::is_active.eq(update.is_active),
                        categories::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;

                Ok(categories::table
                    .find(&category_id)
                    .first::<Category>(conn)?)
            })
            .await
    }

    async fn delete(&self, budget_id: &str, category_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                categories::table
                    .filter(categories::id.eq(&category_id))
                    .filter(categories::budget_id.eq(&budget_id))
                    .first::<Category>(conn)?;
                Ok(diesel::delete(categories::table.find(&category_id)).execute(conn)?)
            })
            .await
    }
}
