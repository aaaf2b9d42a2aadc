//! Aggregation, KPI and export services over generated records.
//!
//! Everything here is synchronous and side-effect free apart from
//! [`export::write_export`].

pub mod dashboard;
pub mod export;
pub mod kpi;
pub mod monthly;

pub use dashboard::{build_dashboard_cards, DashboardDataset, DEFAULT_DASHBOARD_LENGTH};
pub use export::{to_delimited, to_delimited_value, write_export};
pub use kpi::{compute_kpi_totals, compute_kpis, percent_change, KpiMemo, KpiTotals};
pub use monthly::{monthly_series, MonthKey, MonthSource, MonthWindow, MonthlyBuckets};
