//! Checkout module.
//!
//! Order payloads exchanged with the order service.

mod order;

pub use order::{Order, OrderItem, OrderLine, OrderRequest};
