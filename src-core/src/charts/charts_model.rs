use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income/expense totals per period, zero-filled along the period axis.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransfersChart {
    pub x_axis: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_series: Option<Vec<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_series: Option<Vec<Decimal>>,
}

/// One line per category or deposit over the same period axis.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChart {
    pub x_axis: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub id: String,
    pub name: String,
    pub values: Vec<Decimal>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransfersChartFilters {
    pub deposit: Option<String>,
    pub entity: Option<String>,
    pub transfer_type: Option<String>,
    pub periods_count: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesChartFilters {
    pub category_type: Option<String>,
    pub period_from: Option<String>,
    pub period_to: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DepositsChartFilters {
    pub period_from: Option<String>,
    pub period_to: Option<String>,
}
