use async_trait::async_trait;

use super::{AuditStatus, NewOrder, Order, OrderFilter};
use crate::domain::ListingSource;
use crate::shared::DomainResult;

#[async_trait]
pub trait OrderRepositoryInterface: ListingSource<Item = Order, Filter = OrderFilter> {
    async fn create_order(&self, order: NewOrder) -> DomainResult<Order>;

    /// Returns `false` when no order has this id.
    async fn update_audit(&self, id: i32, audit: AuditStatus) -> DomainResult<bool>;
}
