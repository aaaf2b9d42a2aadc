use crate::models::{Order, OrderStatus};

use super::{
    random::{derive_seed, sample_below},
    DatasetCalendar, EntityGenerator, EntityKind,
};

const CREATED_SEED: (i64, i64) = (9_301, 49_297);
const DELIVERY_SEED: (i64, i64) = (104_729, 7);
const QUANTITY_SEED_MULTIPLIER: i64 = 31;
const BASE_UNIT_PRICE: i64 = 2_490;
const UNIT_PRICE_STEP: i64 = 125;

pub struct OrderGenerator;

impl EntityGenerator for OrderGenerator {
    type Entity = Order;

    const KIND: EntityKind = EntityKind::Orders;

    fn build(id: u64, calendar: &DatasetCalendar) -> Order {
        let created_at = calendar.date_for(id, derive_seed(id, CREATED_SEED.0, CREATED_SEED.1));
        let delivery_date =
            calendar.date_for(id, derive_seed(id, DELIVERY_SEED.0, DELIVERY_SEED.1));

        let quantity = sample_below(derive_seed(id, QUANTITY_SEED_MULTIPLIER, 0), 5) + 1;
        let status = OrderStatus::ALL[(id % OrderStatus::ALL.len() as u64) as usize];

        Order {
            id,
            customer_id: (((id * 7) % 50) + 1).to_string(),
            stock_id: 100 + (id * 11) % 200,
            quantity,
            total_amount: unit_price(id) * i64::from(quantity),
            status,
            delivery_date,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Unit price charged on order `id`: one of 2490, 2615 or 2740.
pub fn unit_price(id: u64) -> i64 {
    BASE_UNIT_PRICE + (id % 3) as i64 * UNIT_PRICE_STEP
}

/// `length` orders with ids `1..=length`.
pub fn generate_orders(length: usize) -> Vec<Order> {
    OrderGenerator::generate(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::to_iso_string;

    #[test]
    fn first_orders_match_reference_values() {
        let orders = generate_orders(3);
        let first = &orders[0];
        assert_eq!(first.customer_id, "8");
        assert_eq!(first.stock_id, 111);
        assert_eq!(first.quantity, 2);
        assert_eq!(first.total_amount, 5_230);
        assert_eq!(first.status, OrderStatus::Shipped);
        assert_eq!(to_iso_string(&first.created_at), "2024-07-30T05:18:00Z");
        assert_eq!(to_iso_string(&first.delivery_date), "2024-07-26T09:17:00Z");

        assert_eq!(orders[2].total_amount, 4_980);
        assert_eq!(orders[2].status, OrderStatus::Cancelled);
    }

    #[test]
    fn status_cycles_with_id() {
        let orders = generate_orders(8);
        assert_eq!(orders[3].status, OrderStatus::Pending);
        assert_eq!(orders[7].status, OrderStatus::Pending);
        assert_eq!(orders[4].status, OrderStatus::Shipped);
    }

    #[test]
    fn unit_prices() {
        assert_eq!(unit_price(3), 2_490);
        assert_eq!(unit_price(1), 2_615);
        assert_eq!(unit_price(2), 2_740);
    }
}
