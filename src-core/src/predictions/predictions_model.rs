use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Planned spending for one expense category within a period.
/// `initial_plan` is the snapshot taken when the period goes active;
/// `current_plan` keeps tracking adjustments afterwards.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::predictions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: String,
    pub period_id: String,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub initial_plan: Option<String>,
    pub current_plan: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Prediction {
    pub fn current_plan_decimal(&self) -> Decimal {
        self.current_plan.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn initial_plan_decimal(&self) -> Option<Decimal> {
        self.initial_plan
            .as_ref()
            .map(|p| p.parse().unwrap_or(Decimal::ZERO))
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::predictions)]
#[serde(rename_all = "camelCase")]
pub struct NewPrediction {
    pub id: Option<String>,
    pub period_id: Option<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    // Never taken from request payloads; set on period activation and
    // by the copy operation.
    #[serde(skip_deserializing)]
    pub initial_plan: Option<String>,
    pub current_plan: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Partial update; a `period_id` differing from the current one is rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PredictionUpdate {
    pub period_id: Option<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub current_plan: Option<String>,
}
