use crate::categories::categories_model::CategoryType;
use crate::categories::Category;
use crate::charts::charts_model::{
    CategoriesChartFilters, ChartSeries, DepositsChartFilters, SeriesChart, TransfersChart,
    TransfersChartFilters,
};
use crate::db::get_connection;
use crate::entities::Entity;
use crate::errors::{Result, ValidationError};
use crate::periods::Period;
use crate::schema::{categories, entities, periods, transfers};
use crate::transfers::transfers_model::{parse_transfer_type, TransferType};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait defining the contract for the charts service
pub trait ChartsServiceTrait: Send + Sync {
    fn transfers_in_periods(
        &self,
        budget_id: &str,
        filters: &TransfersChartFilters,
    ) -> Result<TransfersChart>;
    fn categories_in_periods(
        &self,
        budget_id: &str,
        filters: &CategoriesChartFilters,
    ) -> Result<SeriesChart>;
    fn deposits_in_periods(
        &self,
        budget_id: &str,
        filters: &DepositsChartFilters,
    ) -> Result<SeriesChart>;
}

/// Read-only transfer aggregations over a budget's period axis. The sums
/// are folded in memory; budgets hold at most a few thousand transfers.
pub struct ChartsService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl ChartsService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        ChartsService { pool }
    }

    fn load_periods(&self, conn: &mut SqliteConnection, budget_id: &str) -> Result<Vec<Period>> {
        Ok(periods::table
            .filter(periods::budget_id.eq(budget_id))
            .order(periods::date_start.asc())
            .load::<Period>(conn)?)
    }

    fn bounded_period(
        conn: &mut SqliteConnection,
        budget_id: &str,
        field: &str,
        period_id: &str,
    ) -> Result<Period> {
        periods::table
            .filter(periods::id.eq(period_id))
            .filter(periods::budget_id.eq(budget_id))
            .first::<Period>(conn)
            .optional()?
            .ok_or_else(|| {
                ValidationError::field(
                    field,
                    &format!("Invalid pk \"{period_id}\" - object does not exist."),
                )
            })
    }

    /// Restricts the axis to periods lying inside the named boundary
    /// periods' dates.
    fn clamp_axis(
        conn: &mut SqliteConnection,
        budget_id: &str,
        mut axis: Vec<Period>,
        period_from: Option<&str>,
        period_to: Option<&str>,
    ) -> Result<Vec<Period>> {
        if let Some(from_id) = period_from {
            let from = Self::bounded_period(conn, budget_id, "period_from", from_id)?;
            axis.retain(|p| p.date_start >= from.date_start);
        }
        if let Some(to_id) = period_to {
            let to = Self::bounded_period(conn, budget_id, "period_to", to_id)?;
            axis.retain(|p| p.date_end <= to.date_end);
        }
        Ok(axis)
    }
}

impl ChartsServiceTrait for ChartsService {
    fn transfers_in_periods(
        &self,
        budget_id: &str,
        filters: &TransfersChartFilters,
    ) -> Result<TransfersChart> {
        let single_type = filters
            .transfer_type
            .as_deref()
            .map(parse_transfer_type)
            .transpose()?;

        let mut conn = get_connection(&self.pool)?;
        let mut axis = self.load_periods(&mut conn, budget_id)?;
        if let Some(count) = filters.periods_count {
            if axis.len() > count {
                axis.drain(..axis.len() - count);
            }
        }

        let mut query = transfers::table
            .filter(transfers::budget_id.eq(budget_id))
            .select((
                transfers::period_id,
                transfers::transfer_type,
                transfers::value,
            ))
            .into_boxed();
        if let Some(deposit) = &filters.deposit {
            query = query.filter(transfers::deposit_id.eq(deposit.clone()));
        }
        if let Some(entity) = &filters.entity {
            query = query.filter(transfers::entity_id.eq(entity.clone()));
        }
        let rows = query.load::<(String, String, String)>(&mut conn)?;

        let mut sums: HashMap<(String, String), Decimal> = HashMap::new();
        for (period_id, transfer_type, value) in rows {
            let value: Decimal = value.parse().unwrap_or(Decimal::ZERO);
            *sums.entry((period_id, transfer_type)).or_default() += value;
        }

        let series_for = |transfer_type: TransferType| -> Vec<Decimal> {
            axis.iter()
                .map(|p| {
                    sums.get(&(p.id.clone(), transfer_type.as_str().to_string()))
                        .copied()
                        .unwrap_or(Decimal::ZERO)
                })
                .collect()
        };

        let (income_series, expense_series) = match single_type {
            Some(TransferType::Income) => (Some(series_for(TransferType::Income)), None),
            Some(TransferType::Expense) => (None, Some(series_for(TransferType::Expense))),
            None => (
                Some(series_for(TransferType::Income)),
                Some(series_for(TransferType::Expense)),
            ),
        };

        Ok(TransfersChart {
            x_axis: axis.into_iter().map(|p| p.name).collect(),
            income_series,
            expense_series,
        })
    }

    fn categories_in_periods(
        &self,
        budget_id: &str,
        filters: &CategoriesChartFilters,
    ) -> Result<SeriesChart> {
        let category_type = filters
            .category_type
            .as_deref()
            .map(|raw| {
                CategoryType::parse(raw).ok_or_else(|| {
                    ValidationError::field(
                        "category_type",
                        &format!("\"{raw}\" is not a valid choice."),
                    )
                })
            })
            .transpose()?;

        let mut conn = get_connection(&self.pool)?;
        let axis = self.load_periods(&mut conn, budget_id)?;
        let axis = Self::clamp_axis(
            &mut conn,
            budget_id,
            axis,
            filters.period_from.as_deref(),
            filters.period_to.as_deref(),
        )?;

        let mut category_query = categories::table
            .filter(categories::budget_id.eq(budget_id))
            .order((categories::priority.asc(), categories::name.asc()))
            .into_boxed();
        if let Some(category_type) = category_type {
            category_query =
                category_query.filter(categories::category_type.eq(category_type.as_str()));
        }
        let budget_categories = category_query.load::<Category>(&mut conn)?;

        let rows = transfers::table
            .filter(transfers::budget_id.eq(budget_id))
            .filter(transfers::category_id.is_not_null())
            .select((
                transfers::period_id,
                transfers::category_id.assume_not_null(),
                transfers::value,
            ))
            .load::<(String, String, String)>(&mut conn)?;

        let mut sums: HashMap<(String, String), Decimal> = HashMap::new();
        for (period_id, category_id, value) in rows {
            let value: Decimal = value.parse().unwrap_or(Decimal::ZERO);
            *sums.entry((period_id, category_id)).or_default() += value;
        }

        let series = budget_categories
            .into_iter()
            .map(|category| ChartSeries {
                values: axis
                    .iter()
                    .map(|p| {
                        sums.get(&(p.id.clone(), category.id.clone()))
                            .copied()
                            .unwrap_or(Decimal::ZERO)
                    })
                    .collect(),
                id: category.id,
                name: category.name,
            })
            .collect();

        Ok(SeriesChart {
            x_axis: axis.into_iter().map(|p| p.name).collect(),
            series,
        })
    }

    fn deposits_in_periods(
        &self,
        budget_id: &str,
        filters: &DepositsChartFilters,
    ) -> Result<SeriesChart> {
        let mut conn = get_connection(&self.pool)?;
        let axis = self.load_periods(&mut conn, budget_id)?;
        let axis = Self::clamp_axis(
            &mut conn,
            budget_id,
            axis,
            filters.period_from.as_deref(),
            filters.period_to.as_deref(),
        )?;

        let deposits = entities::table
            .filter(entities::budget_id.eq(budget_id))
            .filter(entities::is_deposit.eq(true))
            .order(entities::name.asc())
            .load::<Entity>(&mut conn)?;

        let rows = transfers::table
            .filter(transfers::budget_id.eq(budget_id))
            .select((
                transfers::period_id,
                transfers::deposit_id,
                transfers::value,
            ))
            .load::<(String, String, String)>(&mut conn)?;

        let mut sums: HashMap<(String, String), Decimal> = HashMap::new();
        for (period_id, deposit_id, value) in rows {
            let value: Decimal = value.parse().unwrap_or(Decimal::ZERO);
            *sums.entry((period_id, deposit_id)).or_default() += value;
        }

        let series = deposits
            .into_iter()
            .map(|deposit| ChartSeries {
                values: axis
                    .iter()
                    .map(|p| {
                        sums.get(&(p.id.clone(), deposit.id.clone()))
                            .copied()
                            .unwrap_or(Decimal::ZERO)
                    })
                    .collect(),
                id: deposit.id,
                name: deposit.name,
            })
            .collect();

        Ok(SeriesChart {
            x_axis: axis.into_iter().map(|p| p.name).collect(),
            series,
        })
    }
}
