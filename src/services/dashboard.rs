//! Dashboard assembly: the demo dataset and its KPI cards.

use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::formatting::NumberLocale;
use crate::generators::{
    CustomerGenerator, DatasetCalendar, EntityGenerator, EntityKind, OrderGenerator,
    StockGenerator,
};
use crate::models::{Customer, Order, Stock};
use crate::reports::{KpiCard, KpiMetric, KpiReport, MonthlyTotal};
use crate::services::export::to_delimited;
use crate::services::kpi::compute_kpis;
use crate::services::monthly::monthly_series;

/// Number of records per collection on the demo dashboard.
pub const DEFAULT_DASHBOARD_LENGTH: usize = 80_000;

/// The three collections behind the dashboard, generated with equal length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardDataset {
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub stocks: Vec<Stock>,
}

impl DashboardDataset {
    pub fn generate(length: usize) -> Self {
        Self::generate_with(&DatasetCalendar::default(), length)
    }

    #[instrument(skip(calendar))]
    pub fn generate_with(calendar: &DatasetCalendar, length: usize) -> Self {
        let dataset = Self {
            orders: OrderGenerator::generate_with(calendar, length),
            customers: CustomerGenerator::generate_with(calendar, length),
            stocks: StockGenerator::generate_with(calendar, length),
        };
        info!(length, "generated dashboard dataset");
        dataset
    }

    pub fn kpis(&self, locale: NumberLocale) -> KpiReport {
        compute_kpis(&self.orders, &self.customers, &self.stocks, locale)
    }

    pub fn cards(&self, locale: NumberLocale) -> Result<Vec<KpiCard>, ServiceError> {
        build_dashboard_cards(&self.orders, &self.customers, &self.stocks, locale)
    }

    /// Table export of one collection.
    pub fn export(&self, kind: EntityKind) -> Result<String, ServiceError> {
        match kind {
            EntityKind::Orders => to_delimited(&self.orders),
            EntityKind::Stocks => to_delimited(&self.stocks),
            EntityKind::Customers => to_delimited(&self.customers),
        }
    }

    /// Order revenue per month, ascending.
    pub fn sales_by_month(&self) -> Vec<MonthlyTotal> {
        monthly_series(&self.orders, |order| order.created_at, |order| order.total_amount)
    }
}

/// KPI cards in display order (sales, stock, customers), each carrying the
/// export of the collection it summarises.
pub fn build_dashboard_cards(
    orders: &[Order],
    customers: &[Customer],
    stocks: &[Stock],
    locale: NumberLocale,
) -> Result<Vec<KpiCard>, ServiceError> {
    let report = compute_kpis(orders, customers, stocks, locale);

    Ok(vec![
        card(report.orders, to_delimited(orders)?, EntityKind::Orders),
        card(report.stocks, to_delimited(stocks)?, EntityKind::Stocks),
        card(report.customers, to_delimited(customers)?, EntityKind::Customers),
    ])
}

fn card(metric: KpiMetric, csv_data: String, kind: EntityKind) -> KpiCard {
    KpiCard {
        title: metric.title,
        value: metric.value,
        trend: metric.trend,
        csv_data,
        csv_filename: kind.csv_filename(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn cards_are_ordered_sales_stock_customers() {
        let dataset = DashboardDataset::generate(100);
        let cards = dataset.cards(NumberLocale::JaJp).unwrap();

        let files: Vec<&str> = cards.iter().map(|c| c.csv_filename.as_str()).collect();
        assert_eq!(files, vec!["orders.csv", "stocks.csv", "customers.csv"]);
        assert_eq!(cards[0].title, "今月の売上");
        assert!(cards[0].csv_data.starts_with("\"id\",\"customer_id\",\"stock_id\""));
    }

    #[test]
    fn empty_dataset_cannot_be_exported() {
        let dataset = DashboardDataset::generate(0);
        assert_matches!(dataset.cards(NumberLocale::JaJp), Err(ServiceError::InvalidInput(_)));
        assert_matches!(dataset.export(EntityKind::Stocks), Err(ServiceError::InvalidInput(_)));
    }

    #[test]
    fn sales_series_covers_both_months() {
        let series = DashboardDataset::generate(100).sales_by_month();
        let months: Vec<String> = series.iter().map(|t| t.month.to_string()).collect();
        assert_eq!(months, vec!["2024-07", "2024-08"]);
        assert_eq!(series[0].total, 421_640);
        assert_eq!(series[1].total, 328_740);
    }
}
