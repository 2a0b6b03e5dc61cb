//! Reservations (orders on spots) and purchases (orders on products).

pub mod model;
pub mod repository;

pub use model::{AuditStatus, NewOrder, Order, OrderFilter};
pub use repository::OrderRepositoryInterface;
