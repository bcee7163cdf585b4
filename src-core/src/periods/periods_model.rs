use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Lifecycle of a budgeting period. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStatus {
    Draft,
    Active,
    Closed,
}

impl PeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::Draft => "DRAFT",
            PeriodStatus::Active => "ACTIVE",
            PeriodStatus::Closed => "CLOSED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodStatus::Draft => "Draft",
            PeriodStatus::Active => "Active",
            PeriodStatus::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DRAFT" => Some(PeriodStatus::Draft),
            "ACTIVE" => Some(PeriodStatus::Active),
            "CLOSED" => Some(PeriodStatus::Closed),
            _ => None,
        }
    }

    pub fn all() -> [PeriodStatus; 3] {
        [
            PeriodStatus::Draft,
            PeriodStatus::Active,
            PeriodStatus::Closed,
        ]
    }
}

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::periods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub status: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

impl Period {
    pub fn status_enum(&self) -> PeriodStatus {
        PeriodStatus::parse(&self.status).unwrap_or(PeriodStatus::Draft)
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::periods)]
#[serde(rename_all = "camelCase")]
pub struct NewPeriod {
    pub id: Option<String>,
    pub budget_id: Option<String>,
    pub name: String,
    pub status: Option<String>,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PeriodUpdate {
    pub name: Option<String>,
    pub status: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl PeriodUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.date_start.is_none()
            && self.date_end.is_none()
    }
}

/// Period enriched with the sums of its transfers, used by list responses.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PeriodWithSums {
    #[serde(flatten)]
    pub period: Period,
    pub incomes_sum: Decimal,
    pub expenses_sum: Decimal,
}

#[derive(Serialize, Debug, Clone)]
pub struct StatusChoice {
    pub value: String,
    pub label: String,
}

pub fn status_choices() -> Vec<StatusChoice> {
    PeriodStatus::all()
        .iter()
        .map(|s| StatusChoice {
            value: s.as_str().to_string(),
            label: s.label().to_string(),
        })
        .collect()
}

/// Closed-interval overlap test between two date ranges.
pub fn dates_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

fn invalid(message: &str) -> crate::errors::Error {
    crate::errors::Error::Validation(ValidationError::InvalidInput(message.to_string()))
}

/// Validates a candidate period against its budget's existing periods.
/// Runs inside the writer transaction so the sibling snapshot cannot go stale.
pub fn validate_new_period(new_period: &NewPeriod, siblings: &[Period]) -> Result<()> {
    if let Some(status) = new_period.status.as_deref() {
        if status != PeriodStatus::Draft.as_str() {
            return Err(invalid("New period has to be created with draft status."));
        }
    }

    if new_period.date_start >= new_period.date_end {
        return Err(invalid("Start date should be earlier than end date."));
    }

    if siblings.iter().any(|p| p.name == new_period.name) {
        return Err(ValidationError::field(
            "name",
            &format!(
                "Period with name \"{}\" already exists in Budget.",
                new_period.name
            ),
        ));
    }

    if siblings.iter().any(|p| {
        dates_overlap(
            new_period.date_start,
            new_period.date_end,
            p.date_start,
            p.date_end,
        )
    }) {
        return Err(invalid(
            "Period date range collides with other period in Budget.",
        ));
    }

    if siblings
        .iter()
        .any(|p| p.date_start >= new_period.date_end)
    {
        return Err(invalid(
            "New period date start has to be greater than previous period date end.",
        ));
    }

    if siblings
        .iter()
        .any(|p| p.status_enum() == PeriodStatus::Draft)
    {
        return Err(invalid("Draft period already exists in Budget."));
    }

    Ok(())
}

/// Validates a status transition. Transitions only move forward;
/// a no-op transition is allowed.
pub fn validate_status_change(current: PeriodStatus, next: PeriodStatus) -> Result<()> {
    if current == next {
        return Ok(());
    }
    match (current, next) {
        (PeriodStatus::Closed, _) => Err(invalid("Closed period cannot be changed.")),
        (PeriodStatus::Draft, PeriodStatus::Closed) => Err(invalid(
            "Draft period cannot be closed. It has to be active first.",
        )),
        (PeriodStatus::Active, PeriodStatus::Draft) => Err(invalid(
            "Active period cannot be moved back to Draft status.",
        )),
        _ => Ok(()),
    }
}

/// Validates a date change on an existing period against its siblings.
pub fn validate_date_change(
    period_id: &str,
    date_start: NaiveDate,
    date_end: NaiveDate,
    siblings: &[Period],
) -> Result<()> {
    if date_start >= date_end {
        return Err(invalid("Start date should be earlier than end date."));
    }

    if siblings
        .iter()
        .filter(|p| p.id != period_id)
        .any(|p| dates_overlap(date_start, date_end, p.date_start, p.date_end))
    {
        return Err(invalid(
            "Period date range collides with other period in Budget.",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(id: &str, status: PeriodStatus, start: NaiveDate, end: NaiveDate) -> Period {
        Period {
            id: id.to_string(),
            budget_id: "b1".to_string(),
            name: format!("period {id}"),
            status: status.as_str().to_string(),
            date_start: start,
            date_end: end,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn new_period(start: NaiveDate, end: NaiveDate) -> NewPeriod {
        NewPeriod {
            id: None,
            budget_id: None,
            name: "2023-07".to_string(),
            status: None,
            date_start: start,
            date_end: end,
            created_at: None,
            updated_at: None,
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
    fn overlap_is_closed_interval() {
        assert!(dates_overlap(
            date(2023, 6, 1),
            date(2023, 6, 30),
            date(2023, 6, 30),
            date(2023, 7, 31),
        ));
        assert!(!dates_overlap(
            date(2023, 6, 1),
            date(2023, 6, 30),
            date(2023, 7, 1),
            date(2023, 7, 31),
        ));
    }

    #[test]
    fn new_period_requires_draft_status() {
        let mut candidate = new_period(date(2023, 7, 1), date(2023, 7, 31));
        candidate.status = Some("ACTIVE".to_string());
        let err = validate_new_period(&candidate, &[]).unwrap_err();
        assert_eq!(message(err), "New period has to be created with draft status.");
    }

    #[test]
    fn new_period_rejects_inverted_dates() {
        let candidate = new_period(date(2023, 7, 31), date(2023, 7, 1));
        let err = validate_new_period(&candidate, &[]).unwrap_err();
        assert_eq!(message(err), "Start date should be earlier than end date.");
    }

    #[test]
    fn new_period_rejects_overlap() {
        let siblings = vec![period(
            "p1",
            PeriodStatus::Active,
            date(2023, 6, 1),
            date(2023, 7, 15),
        )];
        let candidate = new_period(date(2023, 7, 1), date(2023, 7, 31));
        let err = validate_new_period(&candidate, &siblings).unwrap_err();
        assert_eq!(
            message(err),
            "Period date range collides with other period in Budget."
        );
    }

    #[test]
    fn new_period_cannot_precede_existing_periods() {
        let siblings = vec![period(
            "p1",
            PeriodStatus::Active,
            date(2023, 8, 1),
            date(2023, 8, 31),
        )];
        let candidate = new_period(date(2023, 7, 1), date(2023, 7, 31));
        let err = validate_new_period(&candidate, &siblings).unwrap_err();
        assert_eq!(
            message(err),
            "New period date start has to be greater than previous period date end."
        );
    }

    #[test]
    fn only_one_draft_per_budget() {
        let siblings = vec![period(
            "p1",
            PeriodStatus::Draft,
            date(2023, 6, 1),
            date(2023, 6, 30),
        )];
        let candidate = new_period(date(2023, 7, 1), date(2023, 7, 31));
        let err = validate_new_period(&candidate, &siblings).unwrap_err();
        assert_eq!(message(err), "Draft period already exists in Budget.");
    }

    #[test]
    fn valid_new_period_after_existing_ones() {
        let siblings = vec![period(
            "p1",
            PeriodStatus::Active,
            date(2023, 6, 1),
            date(2023, 6, 30),
        )];
        let candidate = new_period(date(2023, 7, 1), date(2023, 7, 31));
        assert!(validate_new_period(&candidate, &siblings).is_ok());
    }

    #[test]
    fn status_moves_forward_only() {
        assert!(validate_status_change(PeriodStatus::Draft, PeriodStatus::Active).is_ok());
        assert!(validate_status_change(PeriodStatus::Active, PeriodStatus::Closed).is_ok());
        assert!(validate_status_change(PeriodStatus::Draft, PeriodStatus::Draft).is_ok());

        let err =
            validate_status_change(PeriodStatus::Closed, PeriodStatus::Active).unwrap_err();
        assert_eq!(message(err), "Closed period cannot be changed.");

        let err = validate_status_change(PeriodStatus::Draft, PeriodStatus::Closed).unwrap_err();
        assert_eq!(
            message(err),
            "Draft period cannot be closed. It has to be active first."
        );

        let err = validate_status_change(PeriodStatus::Active, PeriodStatus::Draft).unwrap_err();
        assert_eq!(
            message(err),
            "Active period cannot be moved back to Draft status."
        );
    }

    #[test]
    fn date_change_ignores_self_when_checking_overlap() {
        let siblings = vec![
            period("p1", PeriodStatus::Active, date(2023, 6, 1), date(2023, 6, 30)),
            period("p2", PeriodStatus::Draft, date(2023, 7, 1), date(2023, 7, 31)),
        ];
        assert!(
            validate_date_change("p2", date(2023, 7, 1), date(2023, 8, 15), &siblings).is_ok()
        );
        let err = validate_date_change("p2", date(2023, 6, 15), date(2023, 7, 31), &siblings)
            .unwrap_err();
        assert_eq!(
            message(err),
            "Period date range collides with other period in Budget."
        );
    }
}
