//! Scenic spots, products, orders and home-page recommendations

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
