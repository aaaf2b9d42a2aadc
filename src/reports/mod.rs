use serde::{Deserialize, Serialize};

use crate::services::monthly::MonthKey;

/// Month-over-month change of one metric, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Signed percentage with one decimal, e.g. `+50.0%` or `-33.3%`.
    pub value: String,
    #[serde(rename = "isPositive")]
    pub is_positive: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub title: String,
    /// Locale-formatted value for the latest month.
    pub value: String,
    pub trend: Trend,
}

/// The three dashboard KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub orders: KpiMetric,
    pub stocks: KpiMetric,
    pub customers: KpiMetric,
}

/// A KPI together with the table export of the collection behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub trend: Trend,
    pub csv_data: String,
    pub csv_filename: String,
}

/// Total of one metric within one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    pub total: i64,
}
