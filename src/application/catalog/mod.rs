//! Scenic catalog: spots, products, their orders and the home-page
//! recommendations.

pub mod service;

pub use service::{AddScenicOutcome, CatalogService, Dashboard, RecommendOutcome, MAX_RECOMMENDED};
