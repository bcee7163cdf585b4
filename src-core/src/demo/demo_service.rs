use crate::budgets::budgets_model::NewBudget;
use crate::categories::categories_model::NewCategory;
use crate::db::WriteHandle;
use crate::entities::entities_model::NewEntity;
use crate::errors::Result;
use crate::periods::periods_model::{NewPeriod, PeriodStatus};
use crate::predictions::predictions_model::NewPrediction;
use crate::schema::{budgets, categories, entities, periods, predictions, transfers, users};
use crate::transfers::transfers_model::{NewTransfer, TransferType};
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

#[async_trait]
pub trait DemoServiceTrait: Send + Sync {
    /// Creates a demo user with a pre-populated budget inside one
    /// transaction and returns the user.
    async fn seed(&self, email: String, name: String, password_hash: String) -> Result<User>;
}

pub struct DemoService {
    writer: WriteHandle,
}

impl DemoService {
    pub fn new(writer: WriteHandle) -> Self {
        DemoService { writer }
    }
}

fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_default()
        .pred_opt()
        .unwrap_or(start);
    (start, end)
}

fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 + offset;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

struct Seeder<'a> {
    conn: &'a mut SqliteConnection,
    now: String,
}

impl Seeder<'_> {
    fn stamp(&self) -> String {
        self.now.clone()
    }

    fn insert_user(&mut self, email: &str, name: &str, password_hash: &str) -> Result<User> {
        let new_user = NewUser {
            id: Some(Uuid::new_v4().to_string()),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(self.stamp()),
            updated_at: Some(self.stamp()),
        };
        diesel::insert_into(users::table)
            .values(&new_user)
            .execute(self.conn)?;
        Ok(users::table
            .find(new_user.id.as_deref().unwrap_or_default())
            .first::<User>(self.conn)?)
    }

    fn insert_budget(&mut self, owner_id: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        diesel::insert_into(budgets::table)
            .values(&NewBudget {
                id: Some(id.clone()),
                name: "Demo budget".to_string(),
                description: Some("Auto-generated example data.".to_string()),
                currency: "USD".to_string(),
                owner_id: Some(owner_id.to_string()),
                created_at: Some(self.stamp()),
                updated_at: Some(self.stamp()),
            })
            .execute(self.conn)?;
        Ok(id)
    }

    fn insert_category(
        &mut self,
        budget_id: &str,
        name: &str,
        category_type: &str,
        priority: i32,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        diesel::insert_into(categories::table)
            .values(&NewCategory {
                id: Some(id.clone()),
                budget_id: Some(budget_id.to_string()),
                name: name.to_string(),
                description: None,
                owner_id: None,
                category_type: category_type.to_string(),
                priority,
                is_active: Some(true),
                created_at: Some(self.stamp()),
                updated_at: Some(self.stamp()),
            })
            .execute(self.conn)?;
        Ok(id)
    }

    fn insert_entity(&mut self, budget_id: &str, name: &str, is_deposit: bool) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        diesel::insert_into(entities::table)
            .values(&NewEntity {
                id: Some(id.clone()),
                budget_id: Some(budget_id.to_string()),
                name: name.to_string(),
                description: String::new(),
                is_active: Some(true),
                is_deposit: Some(is_deposit),
                created_at: Some(self.stamp()),
                updated_at: Some(self.stamp()),
            })
            .execute(self.conn)?;
        Ok(id)
    }

    fn insert_period(
        &mut self,
        budget_id: &str,
        name: &str,
        status: PeriodStatus,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        diesel::insert_into(periods::table)
            .values(&NewPeriod {
                id: Some(id.clone()),
                budget_id: Some(budget_id.to_string()),
                name: name.to_string(),
                status: Some(status.as_str().to_string()),
                date_start,
                date_end,
                created_at: Some(self.stamp()),
                updated_at: Some(self.stamp()),
            })
            .execute(self.conn)?;
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_transfer(
        &mut self,
        budget_id: &str,
        period_id: &str,
        name: &str,
        value: &str,
        date: NaiveDate,
        transfer_type: TransferType,
        deposit_id: &str,
        entity_id: &str,
        category_id: &str,
    ) -> Result<()> {
        diesel::insert_into(transfers::table)
            .values(&NewTransfer {
                id: Some(Uuid::new_v4().to_string()),
                budget_id: Some(budget_id.to_string()),
                period_id: period_id.to_string(),
                name: name.to_string(),
                description: None,
                value: value.to_string(),
                date,
                transfer_type: transfer_type.as_str().to_string(),
                deposit_id: deposit_id.to_string(),
                entity_id: Some(entity_id.to_string()),
                category_id: Some(category_id.to_string()),
                created_at: Some(self.stamp()),
                updated_at: Some(self.stamp()),
            })
            .execute(self.conn)?;
        Ok(())
    }

    fn insert_prediction(
        &mut self,
        period_id: &str,
        category_id: &str,
        initial_plan: Option<&str>,
        current_plan: &str,
    ) -> Result<()> {
        diesel::insert_into(predictions::table)
            .values(&NewPrediction {
                id: Some(Uuid::new_v4().to_string()),
                period_id: Some(period_id.to_string()),
                category_id: Some(category_id.to_string()),
                description: None,
                initial_plan: initial_plan.map(str::to_string),
                current_plan: current_plan.to_string(),
                created_at: Some(self.stamp()),
                updated_at: Some(self.stamp()),
            })
            .execute(self.conn)?;
        Ok(())
    }
}

#[async_trait]
impl DemoServiceTrait for DemoService {
    async fn seed(&self, email: String, name: String, password_hash: String) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut seeder = Seeder {
                    conn,
                    now: Utc::now().to_rfc3339(),
                };

                let user = seeder.insert_user(&email, &name, &password_hash)?;
                let budget = seeder.insert_budget(&user.id)?;

                let salary = seeder.insert_category(&budget, "Salary", "INCOME", 201)?;
                let groceries = seeder.insert_category(&budget, "Groceries", "EXPENSE", 101)?;
                let bills = seeder.insert_category(&budget, "Bills", "EXPENSE", 102)?;
                let leisure = seeder.insert_category(&budget, "Leisure", "EXPENSE", 104)?;

                let checking = seeder.insert_entity(&budget, "Checking account", true)?;
                let savings = seeder.insert_entity(&budget, "Savings account", true)?;
                let employer = seeder.insert_entity(&budget, "Employer", false)?;
                let supermarket = seeder.insert_entity(&budget, "Supermarket", false)?;
                let utilities = seeder.insert_entity(&budget, "Utility company", false)?;

                let today = Utc::now().naive_utc().date();
                let (prev_year, prev_month) = shift_month(today.year(), today.month(), -1);
                let (next_year, next_month) = shift_month(today.year(), today.month(), 1);
                let (closed_start, closed_end) = month_bounds(prev_year, prev_month);
                let (active_start, active_end) = month_bounds(today.year(), today.month());
                let (draft_start, draft_end) = month_bounds(next_year, next_month);

                let closed = seeder.insert_period(
                    &budget,
                    &closed_start.format("%Y-%m").to_string(),
                    PeriodStatus::Closed,
                    closed_start,
                    closed_end,
                )?;
                let active = seeder.insert_period(
                    &budget,
                    &active_start.format("%Y-%m").to_string(),
                    PeriodStatus::Active,
                    active_start,
                    active_end,
                )?;
                seeder.insert_period(
                    &budget,
                    &draft_start.format("%Y-%m").to_string(),
                    PeriodStatus::Draft,
                    draft_start,
                    draft_end,
                )?;

                for (period, start) in [(&closed, closed_start), (&active, active_start)] {
                    seeder.insert_transfer(
                        &budget,
                        period,
                        "Monthly salary",
                        "5000",
                        start,
                        TransferType::Income,
                        &checking,
                        &employer,
                        &salary,
                    )?;
                    seeder.insert_transfer(
                        &budget,
                        period,
                        "Weekly groceries",
                        "320.50",
                        start + chrono::Days::new(5),
                        TransferType::Expense,
                        &checking,
                        &supermarket,
                        &groceries,
                    )?;
                    seeder.insert_transfer(
                        &budget,
                        period,
                        "Electricity bill",
                        "140.25",
                        start + chrono::Days::new(10),
                        TransferType::Expense,
                        &savings,
                        &utilities,
                        &bills,
                    )?;
                }

                seeder.insert_prediction(&closed, &groceries, Some("1200"), "1350")?;
                seeder.insert_prediction(&closed, &bills, Some("400"), "400")?;
                seeder.insert_prediction(&active, &groceries, Some("1200"), "1200")?;
                seeder.insert_prediction(&active, &bills, Some("400"), "450")?;
                seeder.insert_prediction(&active, &leisure, Some("250"), "250")?;

                debug!("Seeded demo budget {} for user {}", budget, user.id);
                Ok(user)
            })
            .await
    }
}
