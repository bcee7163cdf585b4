use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A counterparty of transfers. Deposits (own accounts, wallets) are
/// entities flagged with `is_deposit`.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::entities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub is_deposit: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::entities)]
#[serde(rename_all = "camelCase")]
pub struct NewEntity {
    pub id: Option<String>,
    pub budget_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: Option<bool>,
    pub is_deposit: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::entities)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    pub is_deposit: bool,
}

/// Query-string filters accepted by the entity list endpoints.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityFilters {
    pub is_deposit: Option<bool>,
    pub is_active: Option<bool>,
    pub name: Option<String>,
}
