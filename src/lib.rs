//! Demo Dashboard Data Library
//!
//! Deterministic demo datasets (customers, orders, stock) for an admin
//! dashboard, with month-over-month KPIs and quoted table export.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod formatting;
pub mod generators;
pub mod models;
pub mod reports;
pub mod services;

pub use errors::ServiceError;
pub use formatting::NumberLocale;
pub use generators::{
    generate_customers, generate_orders, generate_stocks, seeded_random, DatasetCalendar,
    EntityGenerator, EntityKind,
};
pub use models::{Customer, Order, OrderStatus, Stock};
pub use reports::{KpiCard, KpiMetric, KpiReport, MonthlyTotal, Trend};
pub use services::{
    build_dashboard_cards, compute_kpis, to_delimited, DashboardDataset, KpiMemo, MonthKey,
    MonthlyBuckets,
};
