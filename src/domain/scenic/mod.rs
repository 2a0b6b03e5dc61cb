//! Scenic spots and shop products.

pub mod model;
pub mod repository;

pub use model::{NewScenic, Scenic, ScenicCategory, ScenicFilter};
pub use repository::ScenicRepositoryInterface;
