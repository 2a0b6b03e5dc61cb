//! HTTP interface of the admin backend
//!
//! - `middleware`: login guard for the protected routes
//! - `modules`: handlers grouped by resource
//! - `common`: envelopes, view descriptors and form helpers
//! - `router`: route table, shared state and Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

#[cfg(test)]
mod tests;

pub use router::{create_api_router, AppState, Catalog, Users};
