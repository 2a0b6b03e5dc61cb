//! Database entities module

pub mod order;
pub mod scenic;
pub mod user;

pub use order::Entity as Order;
pub use scenic::Entity as Scenic;
pub use user::Entity as User;
