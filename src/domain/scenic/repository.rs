use async_trait::async_trait;

use super::{NewScenic, Scenic, ScenicFilter};
use crate::domain::ListingSource;
use crate::shared::DomainResult;

#[async_trait]
pub trait ScenicRepositoryInterface: ListingSource<Item = Scenic, Filter = ScenicFilter> {
    async fn create_scenic(&self, scenic: NewScenic) -> DomainResult<Scenic>;

    async fn get_scenic(&self, id: i32) -> DomainResult<Option<Scenic>>;

    /// Returns `false` when no scenic has this id.
    async fn set_recommended(&self, id: i32, recommended: bool) -> DomainResult<bool>;

    /// Marks the scenic recommended in one statement, only while fewer than
    /// `limit` scenics are recommended. Returns `false` when nothing changed,
    /// either because the id is unknown or the limit is reached.
    async fn recommend_within_limit(&self, id: i32, limit: u64) -> DomainResult<bool>;

    /// Deletes the scenics together with their orders. Returns the number of
    /// scenics removed.
    async fn delete_scenics(&self, ids: &[i32]) -> DomainResult<u64>;
}
