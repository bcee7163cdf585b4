use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A budget shared between its owner and invited members.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub owner_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budget_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetMember {
    pub id: String,
    pub budget_id: String,
    pub user_id: String,
}
