use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Whether a category collects incomes or expenses. Each side owns a
/// disjoint group of priority codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "INCOME",
            CategoryType::Expense => "EXPENSE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INCOME" => Some(CategoryType::Income),
            "EXPENSE" => Some(CategoryType::Expense),
            _ => None,
        }
    }

    pub fn priorities(&self) -> &'static [i32] {
        match self {
            CategoryType::Expense => &[101, 102, 103, 104],
            CategoryType::Income => &[201, 202],
        }
    }
}

/// Database model for transfer categories
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub category_type: String,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Category {
    pub fn type_enum(&self) -> CategoryType {
        CategoryType::parse(&self.category_type).unwrap_or(CategoryType::Expense)
    }

    pub fn is_expense(&self) -> bool {
        self.type_enum() == CategoryType::Expense
    }

    /// Personal categories belong to one budget member; common ones to all.
    pub fn is_personal(&self) -> bool {
        self.owner_id.is_some()
    }
}

/// Model for creating a new category
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub budget_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub category_type: String,
    pub priority: i32,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Model for updating a category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub category_type: String,
    pub priority: i32,
    pub is_active: bool,
}

/// Query-string filters accepted by the category list endpoint.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilters {
    pub category_type: Option<String>,
    pub is_active: Option<bool>,
    pub owner: Option<String>,
}

/// Checks the type string and that the priority falls in the type's group.
pub fn validate_type_and_priority(category_type: &str, priority: i32) -> Result<CategoryType> {
    let parsed = CategoryType::parse(category_type).ok_or_else(|| {
        ValidationError::field(
            "category_type",
            &format!("\"{category_type}\" is not a valid choice."),
        )
    })?;
    if !parsed.priorities().contains(&priority) {
        return Err(ValidationError::field(
            "priority",
            "Invalid priority for provided category_type.",
        ));
    }
    Ok(parsed)
}
