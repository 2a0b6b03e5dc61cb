use async_trait::async_trait;

use super::{CreateUserDto, User, UserFilter, UserStatus};
use crate::domain::ListingSource;
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: ListingSource<Item = User, Filter = UserFilter> {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn update_user_password(&self, id: i32, new_password_hash: &str) -> DomainResult<()>;
    async fn update_user_header(&self, id: i32, header_url: &str) -> DomainResult<()>;

    /// Applies every status change in one transaction. Returns the number of
    /// users updated.
    async fn set_user_statuses(&self, changes: &[(i32, UserStatus)]) -> DomainResult<u64>;

    async fn delete_users(&self, ids: &[i32]) -> DomainResult<u64>;
}
