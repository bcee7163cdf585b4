use crate::db::{get_connection, WriteHandle};
use crate::errors::{Error, Result, ValidationError};
use crate::periods::periods_model::{
    validate_date_change, validate_new_period, validate_status_change, NewPeriod, Period,
    PeriodStatus, PeriodUpdate, PeriodWithSums,
};
use crate::periods::periods_traits::PeriodRepositoryTrait;
use crate::predictions::predictions_model::NewPrediction;
use crate::schema::{categories, periods, predictions, transfers};
use crate::transfers::transfers_model::TransferType;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct PeriodRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PeriodRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PeriodRepository { pool, writer }
    }
}

fn load_siblings(conn: &mut SqliteConnection, budget_id: &str) -> Result<Vec<Period>> {
    Ok(periods::table
        .filter(periods::budget_id.eq(budget_id))
        .order(periods::date_start.asc())
        .load::<Period>(conn)?)
}

fn find_in_budget(
    conn: &mut SqliteConnection,
    budget_id: &str,
    period_id: &str,
) -> Result<Period> {
    Ok(periods::table
        .filter(periods::id.eq(period_id))
        .filter(periods::budget_id.eq(budget_id))
        .first::<Period>(conn)?)
}

/// Snapshot of plans taken when a draft period goes active: predictions
/// without an initial plan get one, and every active expense category
/// without a prediction gets a zero-valued one.
fn prepare_predictions_on_activation(
    conn: &mut SqliteConnection,
    budget_id: &str,
    period_id: &str,
) -> Result<()> {
    diesel::update(
        predictions::table
            .filter(predictions::period_id.eq(period_id))
            .filter(predictions::initial_plan.is_null()),
    )
    .set(predictions::initial_plan.eq(predictions::current_plan.nullable()))
    .execute(conn)?;

    let predicted: Vec<Option<String>> = predictions::table
        .filter(predictions::period_id.eq(period_id))
        .select(predictions::category_id)
        .load(conn)?;
    let predicted: Vec<String> = predicted.into_iter().flatten().collect();

    let expense_categories: Vec<String> = categories::table
        .filter(categories::budget_id.eq(budget_id))
        .filter(categories::category_type.eq("EXPENSE"))
        .filter(categories::is_active.eq(true))
        .select(categories::id)
        .load(conn)?;

    let now = Utc::now().to_rfc3339();
    for category_id in expense_categories
        .into_iter()
        .filter(|id| !predicted.contains(id))
    {
        let zero = NewPrediction {
            id: Some(Uuid::new_v4().to_string()),
            period_id: Some(period_id.to_string()),
            category_id: Some(category_id),
            description: None,
            initial_plan: Some("0".to_string()),
            current_plan: "0".to_string(),
            created_at: Some(now.clone()),
            updated_at: Some(now.clone()),
        };
        diesel::insert_into(predictions::table)
            .values(&zero)
            .execute(conn)?;
    }

    Ok(())
}

#[async_trait]
impl PeriodRepositoryTrait for PeriodRepository {
    fn list(&self, budget_id: &str) -> Result<Vec<Period>> {
        let mut conn = get_connection(&self.pool)?;
        load_siblings(&mut conn, budget_id)
    }

    fn list_with_sums(&self, budget_id: &str) -> Result<Vec<PeriodWithSums>> {
        let mut conn = get_connection(&self.pool)?;
        let period_rows = load_siblings(&mut conn, budget_id)?;

        let transfer_rows: Vec<(String, String, String)> = transfers::table
            .filter(transfers::budget_id.eq(budget_id))
            .select((
                transfers::period_id,
                transfers::transfer_type,
                transfers::value,
            ))
            .load(&mut conn)?;

        let mut sums: HashMap<String, (Decimal, Decimal)> = HashMap::new();
        for (period_id, transfer_type, value) in transfer_rows {
            let value: Decimal = value.parse().unwrap_or(Decimal::ZERO);
            let entry = sums.entry(period_id).or_default();
            if transfer_type == TransferType::Income.as_str() {
                entry.0 += value;
            } else {
                entry.1 += value;
            }
        }

        Ok(period_rows
            .into_iter()
            .map(|period| {
                let (incomes_sum, expenses_sum) =
                    sums.get(&period.id).copied().unwrap_or_default();
                PeriodWithSums {
                    period,
                    incomes_sum,
                    expenses_sum,
                }
            })
            .collect())
    }

    fn find(&self, budget_id: &str, period_id: &str) -> Result<Period> {
        let mut conn = get_connection(&self.pool)?;
        find_in_budget(&mut conn, budget_id, period_id)
    }

    async fn create(&self, budget_id: &str, new_period: NewPeriod) -> Result<Period> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Period> {
                let siblings = load_siblings(conn, &budget_id)?;
                validate_new_period(&new_period, &siblings)?;

                let now = Utc::now().to_rfc3339();
                let new_period = NewPeriod {
                    id: Some(Uuid::new_v4().to_string()),
                    budget_id: Some(budget_id),
                    status: Some(PeriodStatus::Draft.as_str().to_string()),
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_period
                };

                diesel::insert_into(periods::table)
                    .values(&new_period)
                    .execute(conn)?;

                Ok(periods::table
                    .find(new_period.id.as_deref().unwrap_or_default())
                    .first::<Period>(conn)?)
            })
            .await
    }

    async fn update(
        &self,
        budget_id: &str,
        period_id: &str,
        update: PeriodUpdate,
    ) -> Result<Period> {
        let budget_id = budget_id.to_string();
        let period_id = period_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Period> {
                let current = find_in_budget(conn, &budget_id, &period_id)?;
                if update.is_empty() {
                    return Ok(current);
                }

                let current_status = current.status_enum();
                if current_status == PeriodStatus::Closed {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Closed period cannot be changed.".to_string(),
                    )));
                }

                let next_status = match update.status.as_deref() {
                    Some(raw) => PeriodStatus::parse(raw).ok_or_else(|| {
                        ValidationError::field(
                            "status",
                            &format!("\"{raw}\" is not a valid choice."),
                        )
                    })?,
                    None => current_status,
                };
                validate_status_change(current_status, next_status)?;

                let siblings = load_siblings(conn, &budget_id)?;

                let activating = current_status == PeriodStatus::Draft
                    && next_status == PeriodStatus::Active;
                if activating
                    && siblings
                        .iter()
                        .any(|p| p.id != period_id && p.status_enum() == PeriodStatus::Active)
                {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Active period already exists in Budget.".to_string(),
                    )));
                }

                let next_name = update.name.clone().unwrap_or_else(|| current.name.clone());
                if next_name != current.name
                    && siblings
                        .iter()
                        .any(|p| p.id != period_id && p.name == next_name)
                {
                    return Err(ValidationError::field(
                        "name",
                        &format!("Period with name \"{next_name}\" already exists in Budget."),
                    ));
                }

                let next_start = update.date_start.unwrap_or(current.date_start);
                let next_end = update.date_end.unwrap_or(current.date_end);
                if next_start != current.date_start || next_end != current.date_end {
                    validate_date_change(&period_id, next_start, next_end, &siblings)?;
                }

                diesel::update(periods::table.find(&period_id))
                    .set((
                        periods::name.eq(&next_name),
                        periods::status.eq(next_status.as_str()),
                        periods::date_start.eq(next_start),
                        periods::date_end.eq(next_end),
                        periods::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;

                if activating {
                    prepare_predictions_on_activation(conn, &budget_id, &period_id)?;
                }

                Ok(periods::table.find(&period_id).first::<Period>(conn)?)
            })
            .await
    }

    async fn delete(&self, budget_id: &str, period_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let period_id = period_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // 404 before delete when the period is not in this budget
                find_in_budget(conn, &budget_id, &period_id)?;
                Ok(diesel::delete(periods::table.find(&period_id)).execute(conn)?)
            })
            .await
    }
}
