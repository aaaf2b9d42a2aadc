//! Month-over-month KPIs for the dashboard.
//!
//! Three metrics are compared between the latest month present in any of the
//! input collections and the month before it:
//! - sales: sum of `total_amount` of orders created in the month;
//! - stock: sum of `quantity` of stock records created in the month, i.e.
//!   intake during the month rather than inventory on hand;
//! - customers: number of customers created in the month.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::formatting::NumberLocale;
use crate::models::{Customer, Order, Stock};
use crate::reports::{KpiMetric, KpiReport, Trend};
use crate::services::monthly::{MonthKey, MonthWindow, MonthlyBuckets};

/// Percent change from `previous` to `current`; zero when there is no baseline.
pub fn percent_change(previous: i64, current: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current - previous) as f64 / previous as f64 * 100.0
}

/// Renders a percent change with one decimal and an explicit `+` for
/// non-negative values.
///
/// Values exactly halfway between two tenths round away from zero
/// (`0.25` renders as `0.3`, `-0.25` as `-0.3`).
pub fn format_trend(pct: f64) -> String {
    let sign = if pct >= 0.0 { "+" } else { "" };
    let rounded = if is_tenths_tie(pct) {
        (pct * 10.0).round() / 10.0
    } else {
        pct
    };
    format!("{sign}{rounded:.1}%")
}

/// True when `value` lies exactly halfway between two tenths, which for an
/// `f64` means it is an odd multiple of 0.25.
fn is_tenths_tie(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0
}

/// A metric's value in the latest and previous month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTotals {
    pub current: i64,
    pub previous: i64,
}

impl MetricTotals {
    fn over<F>(window: &MonthWindow, value_in: F) -> Self
    where
        F: Fn(&MonthKey) -> i64,
    {
        Self {
            current: value_in(&window.latest),
            previous: value_in(&window.previous),
        }
    }

    pub fn percent_change(&self) -> f64 {
        percent_change(self.previous, self.current)
    }

    pub fn trend(&self, label: &str) -> Trend {
        let pct = self.percent_change();
        Trend {
            value: format_trend(pct),
            is_positive: pct >= 0.0,
            label: label.to_string(),
        }
    }
}

/// Raw KPI numbers before locale formatting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiTotals {
    /// `None` when none of the collections holds a dated record.
    pub window: Option<MonthWindow>,
    pub sales: MetricTotals,
    pub stock_intake: MetricTotals,
    pub customers: MetricTotals,
}

impl KpiTotals {
    pub fn render(&self, locale: NumberLocale) -> KpiReport {
        let labels = locale.labels();
        KpiReport {
            orders: KpiMetric {
                title: labels.sales_title.to_string(),
                value: locale.format_currency(self.sales.current),
                trend: self.sales.trend(labels.trend_label),
            },
            stocks: KpiMetric {
                title: labels.stock_title.to_string(),
                value: locale.format_count(self.stock_intake.current),
                trend: self.stock_intake.trend(labels.trend_label),
            },
            customers: KpiMetric {
                title: labels.customers_title.to_string(),
                value: locale.format_count(self.customers.current),
                trend: self.customers.trend(labels.trend_label),
            },
        }
    }
}

#[instrument(skip_all, fields(orders = orders.len(), customers = customers.len(), stocks = stocks.len()))]
pub fn compute_kpi_totals(orders: &[Order], customers: &[Customer], stocks: &[Stock]) -> KpiTotals {
    let order_buckets = MonthlyBuckets::bucket(orders, |order| order.created_at);
    let customer_buckets = MonthlyBuckets::bucket(customers, |customer| customer.created_at);
    let stock_buckets = MonthlyBuckets::bucket(stocks, |stock| stock.created_at);

    let Some(window) = MonthWindow::spanning([
        order_buckets.sorted_keys(),
        customer_buckets.sorted_keys(),
        stock_buckets.sorted_keys(),
    ]) else {
        info!("no dated records, KPIs are zero");
        return KpiTotals::default();
    };

    let totals = KpiTotals {
        window: Some(window),
        sales: MetricTotals::over(&window, |month| {
            order_buckets.sum_by(month, |order| order.total_amount)
        }),
        stock_intake: MetricTotals::over(&window, |month| {
            stock_buckets.sum_by(month, |stock| i64::from(stock.quantity))
        }),
        customers: MetricTotals::over(&window, |month| customer_buckets.count(month) as i64),
    };

    info!(
        latest = %window.latest,
        previous = %window.previous,
        sales = totals.sales.current,
        stock_intake = totals.stock_intake.current,
        customers = totals.customers.current,
        "computed KPI totals"
    );
    totals
}

/// Computes and formats the three dashboard KPIs.
pub fn compute_kpis(
    orders: &[Order],
    customers: &[Customer],
    stocks: &[Stock],
    locale: NumberLocale,
) -> KpiReport {
    compute_kpi_totals(orders, customers, stocks).render(locale)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MemoKey {
    orders: (usize, usize),
    customers: (usize, usize),
    stocks: (usize, usize),
    locale: NumberLocale,
}

fn identity<T>(records: &[T]) -> (usize, usize) {
    (records.as_ptr() as usize, records.len())
}

/// Caches the last KPI report, recomputing only when one of the three input
/// slices is a different allocation or length, or the locale changes.
///
/// Contents are not compared: mutating a collection in place without changing
/// its length is not detected.
#[derive(Debug, Default)]
pub struct KpiMemo {
    cached: Option<(MemoKey, KpiReport)>,
    computations: usize,
}

impl KpiMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        orders: &[Order],
        customers: &[Customer],
        stocks: &[Stock],
        locale: NumberLocale,
    ) -> &KpiReport {
        let key = MemoKey {
            orders: identity(orders),
            customers: identity(customers),
            stocks: identity(stocks),
            locale,
        };

        if !matches!(&self.cached, Some((cached, _)) if *cached == key) {
            self.cached = None;
            self.computations += 1;
        }

        let (_, report) = self
            .cached
            .get_or_insert_with(|| (key, compute_kpis(orders, customers, stocks, locale)));
        report
    }

    /// How many times the report has been computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
