use crate::categories::Category;
use crate::db::{get_connection, WriteHandle};
use crate::entities::Entity;
use crate::errors::{Result, ValidationError};
use crate::periods::Period;
use crate::schema::{categories, entities, periods, transfers};
use crate::transfers::transfers_model::{
    parse_positive_value, parse_transfer_type, validate_transfer_relations, NewTransfer, Transfer,
    TransferFilters, TransferUpdate,
};
use crate::transfers::transfers_traits::TransferRepositoryTrait;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct TransferRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransferRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransferRepository { pool, writer }
    }
}

fn missing_pk(field: &str, id: &str) -> crate::errors::Error {
    ValidationError::field(field, &format!("Invalid pk \"{id}\" - object does not exist."))
}

fn fetch_period(conn: &mut SqliteConnection, id: &str) -> Result<Period> {
    periods::table
        .find(id)
        .first::<Period>(conn)
        .optional()?
        .ok_or_else(|| missing_pk("period", id))
}

fn fetch_entity(conn: &mut SqliteConnection, field: &str, id: &str) -> Result<Entity> {
    entities::table
        .find(id)
        .first::<Entity>(conn)
        .optional()?
        .ok_or_else(|| missing_pk(field, id))
}

fn fetch_category(conn: &mut SqliteConnection, id: &str) -> Result<Category> {
    categories::table
        .find(id)
        .first::<Category>(conn)
        .optional()?
        .ok_or_else(|| missing_pk("category", id))
}

/// Runs the full relation validation for a create or replace payload.
fn validate_payload(
    conn: &mut SqliteConnection,
    budget_id: &str,
    transfer_type: &str,
    value: &str,
    period_id: &str,
    deposit_id: &str,
    entity_id: Option<&str>,
    category_id: Option<&str>,
) -> Result<()> {
    let transfer_type = parse_transfer_type(transfer_type)?;
    parse_positive_value(value)?;

    let period = fetch_period(conn, period_id)?;
    let deposit = fetch_entity(conn, "deposit", deposit_id)?;
    let entity = entity_id
        .map(|id| fetch_entity(conn, "entity", id))
        .transpose()?;
    let category = category_id.map(|id| fetch_category(conn, id)).transpose()?;

    validate_transfer_relations(
        budget_id,
        transfer_type,
        &period,
        &deposit,
        entity.as_ref(),
        category.as_ref(),
    )
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    fn list(&self, budget_id: &str, filters: &TransferFilters) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transfers::table
            .filter(transfers::budget_id.eq(budget_id))
            .order((transfers::date.desc(), transfers::created_at.desc()))
            .into_boxed();

        if let Some(transfer_type) = &filters.transfer_type {
            query = query.filter(transfers::transfer_type.eq(transfer_type.clone()));
        }
        if let Some(period) = &filters.period {
            query = query.filter(transfers::period_id.eq(period.clone()));
        }
        if let Some(deposit) = &filters.deposit {
            query = query.filter(transfers::deposit_id.eq(deposit.clone()));
        }
        if let Some(entity) = &filters.entity {
            query = query.filter(transfers::entity_id.eq(entity.clone()));
        }
        if let Some(category) = &filters.category {
            query = query.filter(transfers::category_id.eq(category.clone()));
        }
        if let Some(date_from) = filters.date_from {
            query = query.filter(transfers::date.ge(date_from));
        }
        if let Some(date_to) = filters.date_to {
            query = query.filter(transfers::date.le(date_to));
        }

        Ok(query.load::<Transfer>(&mut conn)?)
    }

    fn find(&self, budget_id: &str, transfer_id: &str) -> Result<Transfer> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transfers::table
            .filter(transfers::id.eq(transfer_id))
            .filter(transfers::budget_id.eq(budget_id))
            .first::<Transfer>(&mut conn)?)
    }

    async fn create(&self, budget_id: &str, new_transfer: NewTransfer) -> Result<Transfer> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transfer> {
                validate_payload(
                    conn,
                    &budget_id,
                    &new_transfer.transfer_type,
                    &new_transfer.value,
                    &new_transfer.period_id,
                    &new_transfer.deposit_id,
                    new_transfer.entity_id.as_deref(),
                    new_transfer.category_id.as_deref(),
                )?;

                let now = Utc::now().to_rfc3339();
                let new_transfer = NewTransfer {
                    id: Some(Uuid::new_v4().to_string()),
                    budget_id: Some(budget_id),
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_transfer
                };

                diesel::insert_into(transfers::table)
                    .values(&new_transfer)
                    .execute(conn)?;

                Ok(transfers::table
                    .find(new_transfer.id.as_deref().unwrap_or_default())
                    .first::<Transfer>(conn)?)
            })
            .await
    }

    async fn update(
        &self,
        budget_id: &str,
        transfer_id: &str,
        update: TransferUpdate,
    ) -> Result<Transfer> {
        let budget_id = budget_id.to_string();
        let transfer_id = transfer_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transfer> {
                transfers::table
                    .filter(transfers::id.eq(&transfer_id))
                    .filter(transfers::budget_id.eq(&budget_id))
                    .first::<Transfer>(conn)?;

                validate_payload(
                    conn,
                    &budget_id,
                    &update.transfer_type,
                    &update.value,
                    &update.period_id,
                    &update.deposit_id,
                    update.entity_id.as_deref(),
                    update.category_id.as_deref(),
                )?;

                diesel::update(transfers::table.find(&transfer_id))
                    .set((
                        transfers::period_id.eq(&update.period_id),
                        transfers::name.eq(&update.name),
                        transfers::description.eq(&update.description),
                        transfers::value.eq(&update.value),
                        transfers::date.eq(update.date),
                        transfers::transfer_type.eq(&update.transfer_type),
                        transfers::deposit_id.eq(&update.deposit_id),
                        transfers::entity_id.eq(&update.entity_id),
                        transfers::category_id.eq(&update.category_id),
                        transfers::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;

                Ok(transfers::table
                    .find(&transfer_id)
                    .first::<Transfer>(conn)?)
            })
            .await
    }

    async fn delete(&self, budget_id: &str, transfer_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let transfer_id = transfer_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                transfers::table
                    .filter(transfers::id.eq(&transfer_id))
                    .filter(transfers::budget_id.eq(&budget_id))
                    .first::<Transfer>(conn)?;
                Ok(diesel::delete(transfers::table.find(&transfer_id)).execute(conn)?)
            })
            .await
    }
}
