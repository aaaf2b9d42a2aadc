//! Calendar-month bucketing of dated records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::errors::ServiceError;
use crate::reports::MonthlyTotal;

/// A UTC calendar month, rendered as `YYYY-MM`.
///
/// Ordering is chronological, which for four-digit years is also the
/// lexicographic ordering of the rendered keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month of `timestamp` as seen in UTC.
    pub fn of<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        let utc = timestamp.with_timezone(&Utc);
        Self {
            year: utc.year(),
            month: utc.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || ServiceError::invalid_input(format!("invalid month key '{s}', expected YYYY-MM"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Anything a record's date accessor may return.
///
/// `None` means the record has no usable date and is left out of every bucket.
pub trait MonthSource {
    fn month_key(&self) -> Option<MonthKey>;
}

impl<Tz: TimeZone> MonthSource for DateTime<Tz> {
    fn month_key(&self) -> Option<MonthKey> {
        Some(MonthKey::of(self))
    }
}

/// RFC 3339 text; empty or unparsable text yields no key.
impl MonthSource for str {
    fn month_key(&self) -> Option<MonthKey> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|timestamp| MonthKey::of(&timestamp))
    }
}

impl MonthSource for String {
    fn month_key(&self) -> Option<MonthKey> {
        self.as_str().month_key()
    }
}

impl<T: MonthSource + ?Sized> MonthSource for &T {
    fn month_key(&self) -> Option<MonthKey> {
        (**self).month_key()
    }
}

impl<T: MonthSource> MonthSource for Option<T> {
    fn month_key(&self) -> Option<MonthKey> {
        self.as_ref().and_then(MonthSource::month_key)
    }
}

/// Records grouped by the month of a date field.
#[derive(Debug)]
pub struct MonthlyBuckets<'a, T> {
    buckets: BTreeMap<MonthKey, Vec<&'a T>>,
    skipped: usize,
}

impl<'a, T> MonthlyBuckets<'a, T> {
    /// Groups `records` by the month `date_of` reports for each of them.
    ///
    /// Records without a usable date are counted in [`skipped`](Self::skipped)
    /// and otherwise ignored.
    pub fn bucket<F, S>(records: &'a [T], date_of: F) -> Self
    where
        F: Fn(&'a T) -> S,
        S: MonthSource,
    {
        let mut buckets: BTreeMap<MonthKey, Vec<&'a T>> = BTreeMap::new();
        let mut skipped = 0;

        for record in records {
            match date_of(record).month_key() {
                Some(key) => buckets.entry(key).or_default().push(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(skipped, total = records.len(), "dropped records without a usable date");
        }

        Self { buckets, skipped }
    }

    /// Distinct keys in ascending order.
    pub fn sorted_keys(&self) -> Vec<MonthKey> {
        self.buckets.keys().copied().collect()
    }

    /// Records dated in `key`; empty when the month has none.
    pub fn get(&self, key: &MonthKey) -> &[&'a T] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &[&'a T])> {
        self.buckets.iter().map(|(key, records)| (key, records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of records left out for lack of a usable date.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn window(&self) -> Option<MonthWindow> {
        MonthWindow::from_sorted(&self.sorted_keys())
    }

    /// Sum of `value_of` over the records of one month.
    pub fn sum_by<V>(&self, key: &MonthKey, value_of: V) -> i64
    where
        V: Fn(&T) -> i64,
    {
        self.get(key).iter().map(|record| value_of(*record)).sum()
    }

    pub fn count(&self, key: &MonthKey) -> usize {
        self.get(key).len()
    }
}

/// The latest month and the one compared against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub latest: MonthKey,
    /// Second-to-last month, or `latest` itself when only one month exists.
    pub previous: MonthKey,
}

impl MonthWindow {
    /// Window over keys that are already sorted ascending; `None` when empty.
    pub fn from_sorted(keys: &[MonthKey]) -> Option<Self> {
        let latest_idx = keys.len().checked_sub(1)?;
        let previous_idx = latest_idx.saturating_sub(1);
        Some(Self {
            latest: keys[latest_idx],
            previous: keys[previous_idx],
        })
    }

    /// Window over the union of several key sets.
    pub fn spanning<I>(key_sets: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec<MonthKey>>,
    {
        let mut keys: Vec<MonthKey> = key_sets.into_iter().flatten().collect();
        keys.sort_unstable();
        keys.dedup();
        Self::from_sorted(&keys)
    }
}

/// Ascending per-month totals of `value_of`, e.g. revenue over time.
pub fn monthly_series<'a, T, F, S, V>(
    records: &'a [T],
    date_of: F,
    value_of: V,
) -> Vec<MonthlyTotal>
where
    F: Fn(&'a T) -> S,
    S: MonthSource,
    V: Fn(&T) -> i64,
{
    let buckets = MonthlyBuckets::bucket(records, date_of);
    buckets
        .iter()
        .map(|(month, rows)| MonthlyTotal {
            month: *month,
            total: rows.iter().map(|record| value_of(*record)).sum(),
        })
        .collect()
}
