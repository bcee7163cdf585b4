use crate::categories::Category;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{Error, Result, ValidationError};
use crate::periods::{Period, PeriodStatus};
use crate::predictions::predictions_model::{NewPrediction, Prediction, PredictionUpdate};
use crate::predictions::predictions_traits::PredictionRepositoryTrait;
use crate::schema::{categories, periods, predictions};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

pub struct PredictionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PredictionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PredictionRepository { pool, writer }
    }
}

fn fetch_period(conn: &mut SqliteConnection, budget_id: &str, period_id: &str) -> Result<Period> {
    Ok(periods::table
        .filter(periods::id.eq(period_id))
        .filter(periods::budget_id.eq(budget_id))
        .first::<Period>(conn)?)
}

fn validate_plan_value(raw: &str) -> Result<Decimal> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::field("current_plan", "A valid number is required."))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::field(
            "current_plan",
            "Value should be higher than 0.00.",
        ));
    }
    Ok(value)
}

/// Category attached to a prediction must be an expense category of the
/// same budget.
fn validate_category(
    conn: &mut SqliteConnection,
    budget_id: &str,
    category_id: &str,
) -> Result<()> {
    let category = categories::table
        .find(category_id)
        .first::<Category>(conn)
        .optional()?
        .ok_or_else(|| {
            ValidationError::field(
                "category",
                &format!("Invalid pk \"{category_id}\" - object does not exist."),
            )
        })?;
    if category.budget_id != budget_id {
        return Err(ValidationError::field(
            "category",
            "TransferCategory from different Budget.",
        ));
    }
    if !category.is_expense() {
        return Err(ValidationError::field(
            "category",
            "Incorrect category provided. Please provide expense category.",
        ));
    }
    Ok(())
}

fn invalid(message: &str) -> Error {
    ValidationError::InvalidInput(message.to_string()).into()
}

#[async_trait]
impl PredictionRepositoryTrait for PredictionRepository {
    fn list(&self, budget_id: &str, period_id: &str) -> Result<Vec<Prediction>> {
        let mut conn = get_connection(&self.pool)?;
        fetch_period(&mut conn, budget_id, period_id)?;
        Ok(predictions::table
            .filter(predictions::period_id.eq(period_id))
            .order(predictions::created_at.asc())
            .load::<Prediction>(&mut conn)?)
    }

    fn find(&self, budget_id: &str, period_id: &str, prediction_id: &str) -> Result<Prediction> {
        let mut conn = get_connection(&self.pool)?;
        fetch_period(&mut conn, budget_id, period_id)?;
        Ok(predictions::table
            .filter(predictions::id.eq(prediction_id))
            .filter(predictions::period_id.eq(period_id))
            .first::<Prediction>(&mut conn)?)
    }

    async fn create(
        &self,
        budget_id: &str,
        period_id: &str,
        new_prediction: NewPrediction,
    ) -> Result<Prediction> {
        let budget_id = budget_id.to_string();
        let period_id = period_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Prediction> {
                let period = fetch_period(conn, &budget_id, &period_id)?;
                match period.status_enum() {
                    PeriodStatus::Active => {
                        return Err(invalid(
                            "New Expense Prediction cannot be added to active Budgeting Period.",
                        ))
                    }
                    PeriodStatus::Closed => {
                        return Err(invalid(
                            "New Expense Prediction cannot be added to closed Budgeting Period.",
                        ))
                    }
                    PeriodStatus::Draft => {}
                }

                validate_plan_value(&new_prediction.current_plan)?;
                if let Some(category_id) = new_prediction.category_id.as_deref() {
                    validate_category(conn, &budget_id, category_id)?;
                }

                let now = Utc::now().to_rfc3339();
                let new_prediction = NewPrediction {
                    id: Some(Uuid::new_v4().to_string()),
                    period_id: Some(period_id),
                    initial_plan: None,
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_prediction
                };

                diesel::insert_into(predictions::table)
                    .values(&new_prediction)
                    .execute(conn)?;

                Ok(predictions::table
                    .find(new_prediction.id.as_deref().unwrap_or_default())
                    .first::<Prediction>(conn)?)
            })
            .await
    }

    async fn update(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
        update: PredictionUpdate,
    ) -> Result<Prediction> {
        let budget_id = budget_id.to_string();
        let period_id = period_id.to_string();
        let prediction_id = prediction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Prediction> {
                let period = fetch_period(conn, &budget_id, &period_id)?;
                let prediction = predictions::table
                    .filter(predictions::id.eq(&prediction_id))
                    .filter(predictions::period_id.eq(&period_id))
                    .first::<Prediction>(conn)?;

                if let Some(new_period) = update.period_id.as_deref() {
                    if new_period != period.id {
                        return Err(invalid(
                            "Budgeting Period for Expense Prediction cannot be changed.",
                        ));
                    }
                }
                if period.status_enum() == PeriodStatus::Closed {
                    return Err(invalid(
                        "Expense Prediction cannot be changed when Budgeting Period is closed.",
                    ));
                }
                if let Some(current_plan) = update.current_plan.as_deref() {
                    validate_plan_value(current_plan)?;
                }
                if let Some(category_id) = update.category_id.as_deref() {
                    validate_category(conn, &budget_id, category_id)?;
                }

                diesel::update(predictions::table.find(&prediction.id))
                    .set((
                        predictions::category_id
                            .eq(update.category_id.or(prediction.category_id.clone())),
                        predictions::description
                            .eq(update.description.or(prediction.description.clone())),
                        predictions::current_plan
                            .eq(update.current_plan.unwrap_or(prediction.current_plan.clone())),
                        predictions::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;

                Ok(predictions::table
                    .find(&prediction.id)
                    .first::<Prediction>(conn)?)
            })
            .await
    }

    async fn delete(
        &self,
        budget_id: &str,
        period_id: &str,
        prediction_id: &str,
    ) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let period_id = period_id.to_string();
        let prediction_id = prediction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let period = fetch_period(conn, &budget_id, &period_id)?;
                predictions::table
                    .filter(predictions::id.eq(&prediction_id))
                    .filter(predictions::period_id.eq(&period_id))
                    .first::<Prediction>(conn)?;

                if period.status_enum() == PeriodStatus::Closed {
                    return Err(invalid(
                        "Expense Prediction cannot be changed when Budgeting Period is closed.",
                    ));
                }
                Ok(diesel::delete(predictions::table.find(&prediction_id)).execute(conn)?)
            })
            .await
    }

    async fn copy_from_previous(
        &self,
        budget_id: &str,
        period_id: &str,
    ) -> Result<Vec<Prediction>> {
        let budget_id = budget_id.to_string();
        let period_id = period_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Prediction>> {
                let target = fetch_period(conn, &budget_id, &period_id)?;

                let existing: i64 = predictions::table
                    .filter(predictions::period_id.eq(&target.id))
                    .count()
                    .get_result(conn)?;
                if existing > 0 {
                    return Err(invalid(
                        "Can not copy Predictions from previous Period if any Prediction for current Period exists.",
                    ));
                }

                let previous = periods::table
                    .filter(periods::budget_id.eq(&budget_id))
                    .filter(periods::date_end.lt(target.date_start))
                    .order(periods::date_end.desc())
                    .first::<Period>(conn)
                    .optional()?
                    .ok_or_else(|| invalid("No predictions to copy from previous Period."))?;

                let source = predictions::table
                    .filter(predictions::period_id.eq(&previous.id))
                    .order(predictions::created_at.asc())
                    .load::<Prediction>(conn)?;
                if source.is_empty() {
                    return Err(invalid("No predictions to copy from previous Period."));
                }

                let now = Utc::now().to_rfc3339();
                let copies: Vec<NewPrediction> = source
                    .into_iter()
                    .map(|prediction| NewPrediction {
                        id: Some(Uuid::new_v4().to_string()),
                        period_id: Some(target.id.clone()),
                        category_id: prediction.category_id,
                        description: prediction.description,
                        initial_plan: None,
                        current_plan: prediction.current_plan,
                        created_at: Some(now.clone()),
                        updated_at: Some(now.clone()),
                    })
                    .collect();

                diesel::insert_into(predictions::table)
                    .values(&copies)
                    .execute(conn)?;

                Ok(predictions::table
                    .filter(predictions::period_id.eq(&target.id))
                    .order(predictions::created_at.asc())
                    .load::<Prediction>(conn)?)
            })
            .await
    }
}
