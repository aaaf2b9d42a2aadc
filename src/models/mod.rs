//! Record types produced by the generators and consumed by the KPI and
//! export services.
//!
//! Field declaration order is the column order of exported tables, so keep
//! it stable.

pub mod customer;
pub mod order;
pub mod stock;

pub use customer::Customer;
pub use order::{Order, OrderStatus};
pub use stock::Stock;
