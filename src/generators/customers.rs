use crate::models::Customer;

use super::{random::derive_seed, DatasetCalendar, EntityGenerator, EntityKind};

const FIRST_NAMES: [&str; 10] = [
    "John", "Jane", "Alex", "Chris", "Sam", "Taylor", "Jordan", "Casey", "Riley", "Morgan",
];

const LAST_NAMES: [&str; 10] = [
    "Doe", "Smith", "Johnson", "Brown", "Davis", "Miller", "Wilson", "Moore", "Taylor", "Anderson",
];

const CREATED_SEED: (i64, i64) = (73_939_133, 17);

pub struct CustomerGenerator;

impl EntityGenerator for CustomerGenerator {
    type Entity = Customer;

    const KIND: EntityKind = EntityKind::Customers;

    fn build(id: u64, calendar: &DatasetCalendar) -> Customer {
        let created_at = calendar.date_for(id, derive_seed(id, CREATED_SEED.0, CREATED_SEED.1));
        let first = FIRST_NAMES[(id % 10) as usize];
        let last = LAST_NAMES[((id * 3) % 10) as usize];

        Customer {
            id: id.to_string(),
            name: format!("{first} {last} {id}"),
            email: format!(
                "{}.{}{id}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            address: format!("{} Main St, Anytown, USA", 100 + id),
            created_at,
            deleted_at: None,
            phone_number: phone_number(id),
            tenant_id: (((id * 7) % 5) + 1).to_string(),
            updated_at: created_at,
        }
    }
}

/// `length` customers with ids `1..=length`.
pub fn generate_customers(length: usize) -> Vec<Customer> {
    CustomerGenerator::generate(length)
}

fn phone_number(id: u64) -> String {
    format!(
        "080-{:04}-{:04}",
        1000 + (id * 73) % 9000,
        1000 + (id * 137) % 9000
    )
}
