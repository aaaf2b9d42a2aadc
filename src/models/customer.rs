use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated customer account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// 1-indexed position in the generated sequence, stringified.
    pub id: String,

    /// Display name, `"{first} {last} {id}"`.
    pub name: String,

    pub email: String,

    pub address: String,

    /// Timestamp when the customer was created.
    pub created_at: DateTime<Utc>,

    /// Soft-delete marker. Generated customers are never deleted.
    pub deleted_at: Option<DateTime<Utc>>,

    /// Phone number in `080-XXXX-XXXX` form.
    pub phone_number: String,

    pub tenant_id: String,

    /// Timestamp when the customer was last updated.
    pub updated_at: DateTime<Utc>,
}
