use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stock intake record: one product line received into a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: u64,

    /// Product name, suffixed with `#{id}`.
    pub name: String,

    /// Unit price in whole currency units, always within `1500..=3499`.
    pub price: i64,

    /// Units received, always within `1..=50`.
    pub quantity: u32,

    pub store_id: String,

    pub user_id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}
