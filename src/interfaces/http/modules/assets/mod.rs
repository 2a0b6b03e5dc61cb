//! Streaming of stored images

pub mod handlers;

pub use handlers::*;
