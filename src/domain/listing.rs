//! Backing-store side of a paginated listing.

use async_trait::async_trait;

use crate::shared::DomainResult;

/// A record collection that can be counted and read page by page under the
/// same filter.
///
/// Implementations must return `fetch` results in a stable order so that
/// consecutive pages neither repeat nor skip rows.
#[async_trait]
pub trait ListingSource: Send + Sync {
    type Item: Send;
    type Filter: Send + Sync;

    async fn count(&self, filter: &Self::Filter) -> DomainResult<u64>;

    async fn fetch(
        &self,
        filter: &Self::Filter,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<Self::Item>>;
}
