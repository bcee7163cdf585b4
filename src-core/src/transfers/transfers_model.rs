use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::{Category, CategoryType};
use crate::entities::Entity;
use crate::errors::{Error, Result, ValidationError};
use crate::periods::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Income,
    Expense,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::Income => "INCOME",
            TransferType::Expense => "EXPENSE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INCOME" => Some(TransferType::Income),
            "EXPENSE" => Some(TransferType::Expense),
            _ => None,
        }
    }

    /// The category type a transfer of this type must reference.
    pub fn category_type(&self) -> CategoryType {
        match self {
            TransferType::Income => CategoryType::Income,
            TransferType::Expense => CategoryType::Expense,
        }
    }
}

/// A single money movement between a deposit and an entity.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub budget_id: String,
    pub period_id: String,
    pub name: String,
    pub description: Option<String>,
    pub value: String,
    pub date: NaiveDate,
    pub transfer_type: String,
    pub deposit_id: String,
    pub entity_id: Option<String>,
    pub category_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Transfer {
    pub fn value_decimal(&self) -> Decimal {
        self.value.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn type_enum(&self) -> TransferType {
        TransferType::parse(&self.transfer_type).unwrap_or(TransferType::Expense)
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transfers)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub id: Option<String>,
    pub budget_id: Option<String>,
    pub period_id: String,
    pub name: String,
    pub description: Option<String>,
    pub value: String,
    pub date: NaiveDate,
    pub transfer_type: String,
    pub deposit_id: String,
    pub entity_id: Option<String>,
    pub category_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Full replacement used by PUT.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransferUpdate {
    pub period_id: String,
    pub name: String,
    pub description: Option<String>,
    pub value: String,
    pub date: NaiveDate,
    pub transfer_type: String,
    pub deposit_id: String,
    pub entity_id: Option<String>,
    pub category_id: Option<String>,
}

/// Query-string filters accepted by the transfer list endpoint.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransferFilters {
    pub transfer_type: Option<String>,
    pub period: Option<String>,
    pub deposit: Option<String>,
    pub entity: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

fn invalid(message: &str) -> Error {
    Error::Validation(ValidationError::InvalidInput(message.to_string()))
}

pub fn parse_transfer_type(raw: &str) -> Result<TransferType> {
    TransferType::parse(raw).ok_or_else(|| {
        ValidationError::field("transfer_type", &format!("\"{raw}\" is not a valid choice."))
    })
}

pub fn parse_positive_value(raw: &str) -> Result<Decimal> {
    let value: Decimal = raw
        .parse()
        .map_err(|_| ValidationError::field("value", "A valid number is required."))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::field(
            "value",
            "Value should be higher than 0.00.",
        ));
    }
    Ok(value)
}

/// Consistency checks between a transfer and the rows it references.
/// Callers fetch the related rows inside the same write transaction.
pub fn validate_transfer_relations(
    budget_id: &str,
    transfer_type: TransferType,
    period: &Period,
    deposit: &Entity,
    entity: Option<&Entity>,
    category: Option<&Category>,
) -> Result<()> {
    if period.budget_id != budget_id {
        return Err(ValidationError::field(
            "period",
            "BudgetingPeriod from different Budget.",
        ));
    }

    if deposit.budget_id != budget_id {
        return Err(ValidationError::field(
            "deposit",
            "Deposit from different Budget.",
        ));
    }
    if !deposit.is_deposit {
        return Err(ValidationError::field(
            "deposit",
            "Provided entity is not a deposit.",
        ));
    }

    if let Some(entity) = entity {
        if entity.budget_id != budget_id {
            return Err(ValidationError::field(
                "entity",
                "Entity from different Budget.",
            ));
        }
        if entity.id == deposit.id {
            return Err(invalid(
                "'deposit' and 'entity' fields cannot contain the same value.",
            ));
        }
    }

    if let Some(category) = category {
        if category.budget_id != budget_id {
            return Err(ValidationError::field(
                "category",
                "TransferCategory from different Budget.",
            ));
        }
        if category.type_enum() != transfer_type.category_type() {
            let message = match transfer_type {
                TransferType::Income => "Invalid TransferCategory for Income provided.",
                TransferType::Expense => "Invalid TransferCategory for Expense provided.",
            };
            return Err(ValidationError::field("category", message));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::PeriodStatus;
    use chrono::NaiveDate;

    fn period(budget_id: &str) -> Period {
        Period {
            id: "p1".to_string(),
            budget_id: budget_id.to_string(),
            name: "2023-06".to_string(),
            status: PeriodStatus::Active.as_str().to_string(),
            date_start: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            date_end: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn entity(id: &str, budget_id: &str, is_deposit: bool) -> Entity {
        Entity {
            id: id.to_string(),
            budget_id: budget_id.to_string(),
            name: id.to_string(),
            description: String::new(),
            is_active: true,
            is_deposit,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn category(budget_id: &str, category_type: CategoryType) -> Category {
        Category {
            id: "c1".to_string(),
            budget_id: budget_id.to_string(),
            name: "Groceries".to_string(),
            description: None,
            owner_id: None,
            category_type: category_type.as_str().to_string(),
            priority: 101,
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn message(err: Error) -> String {
        match err {
            Error::Validation(ValidationError::InvalidInput(msg)) => msg,
            Error::Validation(ValidationError::Field { message, .. }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn value_must_be_positive() {
        assert!(parse_positive_value("12.50").is_ok());
        let err = parse_positive_value("0").unwrap_err();
        assert_eq!(message(err), "Value should be higher than 0.00.");
        let err = parse_positive_value("-3").unwrap_err();
        assert_eq!(message(err), "Value should be higher than 0.00.");
    }

    #[test]
    fn period_must_belong_to_budget() {
        let err = validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b2"),
            &entity("d1", "b1", true),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(message(err), "BudgetingPeriod from different Budget.");
    }

    #[test]
    fn deposit_flag_is_required() {
        let err = validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b1"),
            &entity("d1", "b1", false),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(message(err), "Provided entity is not a deposit.");
    }

    #[test]
    fn deposit_and_entity_must_differ() {
        let deposit = entity("d1", "b1", true);
        let err = validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b1"),
            &deposit,
            Some(&deposit),
            None,
        )
        .unwrap_err();
        assert_eq!(
            message(err),
            "'deposit' and 'entity' fields cannot contain the same value."
        );
    }

    #[test]
    fn category_type_must_match_transfer_type() {
        let err = validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b1"),
            &entity("d1", "b1", true),
            Some(&entity("e1", "b1", false)),
            Some(&category("b1", CategoryType::Income)),
        )
        .unwrap_err();
        assert_eq!(message(err), "Invalid TransferCategory for Expense provided.");

        let err = validate_transfer_relations(
            "b1",
            TransferType::Income,
            &period("b1"),
            &entity("d1", "b1", true),
            None,
            Some(&category("b1", CategoryType::Expense)),
        )
        .unwrap_err();
        assert_eq!(message(err), "Invalid TransferCategory for Income provided.");
    }

    #[test]
    fn cross_budget_relations_are_rejected() {
        let err = validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b1"),
            &entity("d1", "b1", true),
            Some(&entity("e1", "b2", false)),
            None,
        )
        .unwrap_err();
        assert_eq!(message(err), "Entity from different Budget.");

        let err = validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b1"),
            &entity("d1", "b1", true),
            None,
            Some(&category("b2", CategoryType::Expense)),
        )
        .unwrap_err();
        assert_eq!(message(err), "TransferCategory from different Budget.");
    }

    #[test]
    fn matching_relations_pass() {
        assert!(validate_transfer_relations(
            "b1",
            TransferType::Expense,
            &period("b1"),
            &entity("d1", "b1", true),
            Some(&entity("e1", "b1", false)),
            Some(&category("b1", CategoryType::Expense)),
        )
        .is_ok());
    }
}
