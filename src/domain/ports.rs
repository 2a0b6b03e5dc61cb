//! Outbound ports implemented by the infrastructure layer.

use async_trait::async_trait;

use crate::shared::DomainResult;

/// Remote object store used for user avatars.
///
/// `put` stores `bytes` under `key` and returns the public URL the object
/// can be fetched from.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> DomainResult<String>;
}
