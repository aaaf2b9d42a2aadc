//! Integration tests for month-over-month KPI computation.

use chrono::{TimeZone, Utc};
use demo_dashboard_data::services::{compute_kpi_totals, MonthKey, MonthlyBuckets};
use demo_dashboard_data::{
    compute_kpis, generate_customers, generate_orders, generate_stocks, DashboardDataset,
    NumberLocale, Order, OrderStatus,
};

fn order_at(id: u64, year: i32, month: u32, total_amount: i64) -> Order {
    let at = Utc.with_ymd_and_hms(year, month, 10, 12, 0, 0).unwrap();
    Order {
        id,
        customer_id: "1".into(),
        stock_id: 100,
        quantity: 1,
        total_amount,
        status: OrderStatus::Pending,
        delivery_date: at,
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn hundred_record_dashboard() {
    let dataset = DashboardDataset::generate(100);
    let report = dataset.kpis(NumberLocale::JaJp);

    assert_eq!(report.orders.title, "今月の売上");
    assert_eq!(report.orders.value, "￥328,740");
    assert_eq!(report.orders.trend.value, "-22.0%");
    assert!(!report.orders.trend.is_positive);
    assert_eq!(report.orders.trend.label, "前月比");

    assert_eq!(report.stocks.value, "2,004");
    assert_eq!(report.stocks.trend.value, "+84.5%");
    assert!(report.stocks.trend.is_positive);

    assert_eq!(report.customers.value, "50");
    assert_eq!(report.customers.trend.value, "+0.0%");
}

#[test]
fn hundred_record_totals() {
    let totals = compute_kpi_totals(
        &generate_orders(100),
        &generate_customers(100),
        &generate_stocks(100),
    );
    let window = totals.window.unwrap();
    assert_eq!(window.latest.to_string(), "2024-08");
    assert_eq!(window.previous.to_string(), "2024-07");
    assert_eq!((totals.sales.previous, totals.sales.current), (421_640, 328_740));
    assert_eq!(
        (totals.stock_intake.previous, totals.stock_intake.current),
        (1_086, 2_004)
    );
    assert_eq!((totals.customers.previous, totals.customers.current), (50, 50));
}

#[test]
fn full_dashboard_dataset() {
    let report = DashboardDataset::generate(80_000).kpis(NumberLocale::JaJp);
    assert_eq!(report.orders.value, "￥627,156,315");
    assert_eq!(report.orders.trend.value, "+148642.1%");
    assert_eq!(report.stocks.value, "2,038,792");
    assert_eq!(report.stocks.trend.value, "+187634.1%");
    assert_eq!(report.customers.value, "79,950");
    assert_eq!(report.customers.trend.value, "+159800.0%");
}

#[test]
fn single_month_has_flat_trends() {
    let report = DashboardDataset::generate(50).kpis(NumberLocale::JaJp);
    for metric in [&report.orders, &report.stocks, &report.customers] {
        assert_eq!(metric.trend.value, "+0.0%");
        assert!(metric.trend.is_positive);
    }
}

#[test]
fn english_locale_formatting() {
    let report = DashboardDataset::generate(100).kpis(NumberLocale::EnUs);
    assert_eq!(report.orders.title, "Sales this month");
    assert_eq!(report.orders.value, "$328,740.00");
    assert_eq!(report.stocks.value, "2,004");
    assert_eq!(report.customers.trend.label, "vs last month");
}

#[test]
fn empty_collections_give_zero_values() {
    let report = compute_kpis(&[], &[], &[], NumberLocale::JaJp);
    assert_eq!(report.orders.value, "￥0");
    assert_eq!(report.stocks.value, "0");
    assert_eq!(report.customers.value, "0");
    assert_eq!(report.stocks.trend.value, "+0.0%");
}

#[test]
fn window_spans_collections() {
    // Orders stop in June while stock runs into July; July is the latest month.
    let orders = vec![order_at(1, 2024, 5, 100), order_at(2, 2024, 6, 300)];
    let stocks = generate_stocks(10);
    let totals = compute_kpi_totals(&orders, &[], &stocks);

    let window = totals.window.unwrap();
    assert_eq!(window.latest, MonthKey::new(2024, 7).unwrap());
    assert_eq!(window.previous, MonthKey::new(2024, 6).unwrap());
    assert_eq!(totals.sales.current, 0);
    assert_eq!(totals.sales.previous, 300);
    assert_eq!(totals.sales.percent_change(), -100.0);
    assert_eq!(totals.customers.current, 0);
}

#[test]
fn bucket_keys_ascend_across_years() {
    let orders = vec![
        order_at(1, 2024, 1, 10),
        order_at(2, 2023, 12, 20),
        order_at(3, 2024, 1, 30),
    ];
    let buckets = MonthlyBuckets::bucket(&orders, |order| order.created_at);
    let keys: Vec<String> = buckets.sorted_keys().iter().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["2023-12", "2024-01"]);
    assert_eq!(buckets.sum_by(&MonthKey::new(2024, 1).unwrap(), |o| o.total_amount), 40);

    let window = buckets.window().unwrap();
    assert_eq!(window.previous.to_string(), "2023-12");
}
