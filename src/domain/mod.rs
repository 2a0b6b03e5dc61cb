//! Domain layer: admin-side records, listing filters and repository traits.

pub mod listing;
pub mod media;
pub mod order;
pub mod ports;
pub mod scenic;
pub mod user;

pub use listing::ListingSource;
pub use media::{image_suffix, ImageUpload};
pub use order::{AuditStatus, NewOrder, Order, OrderFilter, OrderRepositoryInterface};
pub use ports::ObjectStorage;
pub use scenic::{NewScenic, Scenic, ScenicCategory, ScenicFilter, ScenicRepositoryInterface};
pub use user::{CreateUserDto, User, UserFilter, UserRepositoryInterface, UserStatus, UserType};

pub use crate::shared::{DomainError, DomainResult};
