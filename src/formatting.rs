//! Locale-aware rendering of KPI values.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Display locale for KPI values and labels.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "ja-JP")]
    #[strum(serialize = "ja-JP")]
    JaJp,
    #[serde(rename = "en-US")]
    #[strum(serialize = "en-US")]
    EnUs,
}

/// Titles and trend label shown on the dashboard cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KpiLabels {
    pub sales_title: &'static str,
    pub stock_title: &'static str,
    pub customers_title: &'static str,
    pub trend_label: &'static str,
}

impl NumberLocale {
    fn currency_symbol(&self) -> &'static str {
        match self {
            Self::JaJp => "\u{FFE5}",
            Self::EnUs => "$",
        }
    }

    fn currency_fraction_digits(&self) -> usize {
        match self {
            Self::JaJp => 0,
            Self::EnUs => 2,
        }
    }

    fn group_separator(&self) -> char {
        ','
    }

    /// Formats whole currency units, e.g. `￥1,234,567` or `$1,234.00`.
    pub fn format_currency(&self, amount: i64) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        let digits = group_digits(amount.unsigned_abs(), self.group_separator());
        match self.currency_fraction_digits() {
            0 => format!("{sign}{}{digits}", self.currency_symbol()),
            places => format!("{sign}{}{digits}.{}", self.currency_symbol(), "0".repeat(places)),
        }
    }

    /// Formats a count with grouping and no decimals.
    pub fn format_count(&self, value: i64) -> String {
        let sign = if value < 0 { "-" } else { "" };
        format!(
            "{sign}{}",
            group_digits(value.unsigned_abs(), self.group_separator())
        )
    }

    pub fn labels(&self) -> KpiLabels {
        match self {
            Self::JaJp => KpiLabels {
                sales_title: "今月の売上",
                stock_title: "総在庫数",
                customers_title: "顧客数",
                trend_label: "前月比",
            },
            Self::EnUs => KpiLabels {
                sales_title: "Sales this month",
                stock_title: "Total inventory",
                customers_title: "Customers",
                trend_label: "vs last month",
            },
        }
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (idx, ch) in raw.chars().enumerate() {
        if idx > 0 && (raw.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
