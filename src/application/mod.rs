//! Application layer: use-cases behind the admin pages.
//!
//! - `listing`: the count + fetch pagination shared by every listing page
//! - `catalog`: scenic spots, products, orders and recommendations
//! - `identity`: user accounts, sign-in and avatars
//! - `messages`: user-facing texts shown by the admin front end

pub mod catalog;
pub mod identity;
pub mod listing;
pub mod messages;

pub use catalog::{AddScenicOutcome, CatalogService, Dashboard, RecommendOutcome, MAX_RECOMMENDED};
pub use identity::{AuthResult, HeaderOutcome, PasswordOutcome, UserService};
pub use listing::{list_page, pager_path, required_keyword};

/// Parses every selected entry as an id; `None` if any entry is not a number.
pub(crate) fn parse_ids(raw: &[String]) -> Option<Vec<i32>> {
    raw.iter().map(|s| s.trim().parse::<i32>().ok()).collect()
}
