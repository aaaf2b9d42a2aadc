//! Deterministic dataset generation.
//!
//! Every generated record is a pure function of its 1-indexed id and a
//! [`DatasetCalendar`]; generating the same length twice yields identical
//! sequences.

pub mod calendar;
pub mod customers;
pub mod orders;
pub mod random;
pub mod stocks;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::debug;
use validator::Validate;

pub use calendar::{days_in_month, is_leap_year, random_date_in_month, to_iso_string};
pub use customers::{generate_customers, CustomerGenerator};
pub use orders::{generate_orders, unit_price, OrderGenerator};
pub use random::seeded_random;
pub use stocks::{generate_stocks, StockGenerator};

/// The two-month spread used to date generated records.
///
/// Ids `1..=split_at` fall in `first_month`, every later id in
/// `second_month`, both in `year`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DatasetCalendar {
    #[validate(range(min = 1970, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub first_month: u32,
    #[validate(range(min = 1, max = 12))]
    pub second_month: u32,
    pub split_at: u64,
}

impl Default for DatasetCalendar {
    fn default() -> Self {
        Self {
            year: 2024,
            first_month: 7,
            second_month: 8,
            split_at: 50,
        }
    }
}

impl DatasetCalendar {
    /// Month a record with this id is dated in.
    pub fn month_for(&self, id: u64) -> u32 {
        if id <= self.split_at {
            self.first_month
        } else {
            self.second_month
        }
    }

    /// Timestamp for a record, drawn inside its month from `seed`.
    pub fn date_for(&self, id: u64, seed: i64) -> DateTime<Utc> {
        random_date_in_month(self.year, self.month_for(id), seed)
    }
}

/// Builds one kind of record from its id.
pub trait EntityGenerator {
    type Entity;

    /// Collection name, used in logs and export file names.
    const KIND: EntityKind;

    fn build(id: u64, calendar: &DatasetCalendar) -> Self::Entity;

    /// `length` records with ids `1..=length`, dated with the default calendar.
    fn generate(length: usize) -> Vec<Self::Entity> {
        Self::generate_with(&DatasetCalendar::default(), length)
    }

    fn generate_with(calendar: &DatasetCalendar, length: usize) -> Vec<Self::Entity> {
        let records: Vec<Self::Entity> = (1..=length as u64)
            .map(|id| Self::build(id, calendar))
            .collect();
        debug!(kind = %Self::KIND, length, year = calendar.year, "generated records");
        records
    }
}

/// The three generated collections.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Orders,
    Stocks,
    Customers,
}

impl EntityKind {
    /// File name used when the collection is exported as a table.
    pub fn csv_filename(&self) -> String {
        format!("{self}.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calendar_splits_after_fifty() {
        let calendar = DatasetCalendar::default();
        assert_eq!(calendar.month_for(1), 7);
        assert_eq!(calendar.month_for(50), 7);
        assert_eq!(calendar.month_for(51), 8);
        assert!(calendar.validate().is_ok());
    }

    #[test]
    fn calendar_rejects_invalid_months() {
        let calendar = DatasetCalendar {
            second_month: 13,
            ..Default::default()
        };
        let errors = calendar.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("second_month"));
    }

    #[test]
    fn export_file_names() {
        assert_eq!(EntityKind::Orders.csv_filename(), "orders.csv");
        assert_eq!(EntityKind::Stocks.csv_filename(), "stocks.csv");
        assert_eq!(EntityKind::Customers.csv_filename(), "customers.csv");
    }
}
