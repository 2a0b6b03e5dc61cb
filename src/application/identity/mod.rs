//! Identity module: back-office sign-in and user account administration.
//!
//! `UserService` owns every user use-case: login, listings, add/remove/ban,
//! password changes and avatar uploads.

pub mod service;

pub use service::{AuthResult, HeaderOutcome, PasswordOutcome, UserService};
