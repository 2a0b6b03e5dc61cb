//! SeaORM implementations of the domain repository traits.

pub mod order_repository;
pub mod scenic_repository;
pub mod user_repository;

pub use order_repository::OrderRepository;
pub use scenic_repository::ScenicRepository;
pub use user_repository::UserRepository;
