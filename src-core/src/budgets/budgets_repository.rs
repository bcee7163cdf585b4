use crate::budgets::budgets_model::{Budget, BudgetMember, BudgetUpdate, NewBudget};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{Result, ValidationError};
use crate::schema::{budget_members, budgets, users};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

fn name_taken(
    conn: &mut SqliteConnection,
    name: &str,
    owner_id: &str,
    exclude_id: Option<&str>,
) -> Result<bool> {
    let mut query = budgets::table
        .filter(budgets::name.eq(name))
        .filter(budgets::owner_id.eq(owner_id))
        .into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(budgets::id.ne(id.to_string()));
    }
    Ok(query.count().get_result::<i64>(conn)? > 0)
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn find_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets::table.find(budget_id).first::<Budget>(&mut conn)?)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let member_budget_ids: Vec<String> = budget_members::table
            .filter(budget_members::user_id.eq(user_id))
            .select(budget_members::budget_id)
            .load(&mut conn)?;

        Ok(budgets::table
            .filter(
                budgets::owner_id
                    .eq(user_id)
                    .or(budgets::id.eq_any(member_budget_ids)),
            )
            .order(budgets::name.asc())
            .load::<Budget>(&mut conn)?)
    }

    fn is_member(&self, budget_id: &str, user_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = budget_members::table
            .filter(budget_members::budget_id.eq(budget_id))
            .filter(budget_members::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }

    fn member_ids(&self, budget_id: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budget_members::table
            .filter(budget_members::budget_id.eq(budget_id))
            .select(budget_members::user_id)
            .load(&mut conn)?)
    }

    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let owner_id = new_budget.owner_id.clone().unwrap_or_default();
                if name_taken(conn, &new_budget.name, &owner_id, None)? {
                    return Err(ValidationError::field(
                        "name",
                        "Budget with given name already exists for this owner.",
                    ));
                }

                let now = Utc::now().to_rfc3339();
                let new_budget = NewBudget {
                    id: Some(Uuid::new_v4().to_string()),
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_budget
                };

                diesel::insert_into(budgets::table)
                    .values(&new_budget)
                    .execute(conn)?;

                Ok(budgets::table
                    .find(new_budget.id.as_deref().unwrap_or_default())
                    .first::<Budget>(conn)?)
            })
            .await
    }

    async fn update(&self, budget_id: &str, update: BudgetUpdate) -> Result<Budget> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let existing: Budget = budgets::table.find(&budget_id).first(conn)?;
                if name_taken(conn, &update.name, &existing.owner_id, Some(&budget_id))? {
                    return Err(ValidationError::field(
                        "name",
                        "Budget with given name already exists for this owner.",
                    ));
                }

                diesel::update(budgets::table.find(&budget_id))
                    .set((
                        budgets::name.eq(&update.name),
                        budgets::description.eq(&update.description),
                        budgets::currency.eq(&update.currency),
                        budgets::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;

                Ok(budgets::table.find(&budget_id).first::<Budget>(conn)?)
            })
            .await
    }

    async fn delete(&self, budget_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(budgets::table.find(budget_id)).execute(conn)?)
            })
            .await
    }

    async fn add_member(&self, budget_id: &str, user_id: &str) -> Result<()> {
        let budget_id = budget_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // 404 when the user does not exist
                users::table
                    .find(&user_id)
                    .select(users::id)
                    .first::<String>(conn)?;

                let already: i64 = budget_members::table
                    .filter(budget_members::budget_id.eq(&budget_id))
                    .filter(budget_members::user_id.eq(&user_id))
                    .count()
                    .get_result(conn)?;
                if already > 0 {
                    return Ok(());
                }

                let member = BudgetMember {
                    id: Uuid::new_v4().to_string(),
                    budget_id,
                    user_id,
                };
                diesel::insert_into(budget_members::table)
                    .values(&member)
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn remove_member(&self, budget_id: &str, user_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budget_members::table
                        .filter(budget_members::budget_id.eq(budget_id))
                        .filter(budget_members::user_id.eq(user_id)),
                )
                .execute(conn)?)
            })
            .await
    }
}
