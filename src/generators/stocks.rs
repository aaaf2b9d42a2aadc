use crate::models::Stock;

use super::{
    random::{derive_seed, sample_below},
    DatasetCalendar, EntityGenerator, EntityKind,
};

const PRODUCT_NAMES: [&str; 10] = [
    "Standard Widget",
    "Premium Widget",
    "Deluxe Widget",
    "Standard Gadget",
    "Pro Gadget",
    "Ultra Gadget",
    "Basic Component",
    "Advanced Component",
    "Accessory Pack",
    "Refurbished Unit",
];

const CREATED_SEED: (i64, i64) = (92_821, 311);
const QUANTITY_SEED_MULTIPLIER: i64 = 19;
const MIN_PRICE: i64 = 1_500;
const PRICE_SPREAD: u64 = 2_000;

pub struct StockGenerator;

impl EntityGenerator for StockGenerator {
    type Entity = Stock;

    const KIND: EntityKind = EntityKind::Stocks;

    fn build(id: u64, calendar: &DatasetCalendar) -> Stock {
        let created_at = calendar.date_for(id, derive_seed(id, CREATED_SEED.0, CREATED_SEED.1));

        Stock {
            id,
            name: format!("{} #{id}", PRODUCT_NAMES[(id % 10) as usize]),
            price: MIN_PRICE + ((id * 37) % PRICE_SPREAD) as i64,
            quantity: sample_below(derive_seed(id, QUANTITY_SEED_MULTIPLIER, 0), 50) + 1,
            store_id: (((id * 11) % 8) + 1).to_string(),
            user_id: (((id * 13) % 5) + 1).to_string(),
            created_at,
            updated_at: created_at,
        }
    }
}

/// `length` stock records with ids `1..=length`.
pub fn generate_stocks(length: usize) -> Vec<Stock> {
    StockGenerator::generate(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::to_iso_string;

    #[test]
    fn reference_records() {
        let stocks = generate_stocks(60);

        let first = &stocks[0];
        assert_eq!(first.name, "Premium Widget #1");
        assert_eq!(first.price, 1_537);
        assert_eq!(first.quantity, 13);
        assert_eq!(first.store_id, "4");
        assert_eq!(first.user_id, "4");
        assert_eq!(to_iso_string(&first.created_at), "2024-07-11T21:50:00Z");

        let sixtieth = &stocks[59];
        assert_eq!(sixtieth.name, "Standard Widget #60");
        assert_eq!(sixtieth.price, 1_720);
        assert_eq!(sixtieth.quantity, 34);
        assert_eq!(to_iso_string(&sixtieth.created_at), "2024-08-23T17:45:00Z");
    }

    #[test]
    fn prices_and_quantities_stay_in_range() {
        for stock in generate_stocks(500) {
            assert!((1_500..=3_499).contains(&stock.price));
            assert!((1..=50).contains(&stock.quantity));
        }
    }
}
