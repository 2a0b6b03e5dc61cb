//! # Travel admin
//!
//! Administrative backend for a travel booking site: scenic spots and
//! products, their reservation and purchase orders, and site users.
//!
//! ## Architecture
//!
//! - **domain**: entities, filters and repository traits
//! - **application**: catalog and identity services, paginated listings
//! - **infrastructure**: SeaORM persistence, file storage, JWT and bcrypt
//! - **interfaces**: axum HTTP API with Swagger documentation
//! - **server**: process lifecycle and logging setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

pub use interfaces::http::create_api_router;

pub use server::{ServerHandle, ServerOptions};
