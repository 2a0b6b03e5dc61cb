//! Local stand-in for the remote avatar bucket.

use async_trait::async_trait;

use super::AssetStore;
use crate::domain::ObjectStorage;
use crate::shared::DomainResult;

/// Writes objects into a local directory and hands out URLs under
/// `public_base`, which must route back to that directory.
pub struct LocalObjectStorage {
    store: AssetStore,
    public_base: String,
}

impl LocalObjectStorage {
    pub fn new(store: AssetStore, public_base: impl Into<String>) -> Self {
        Self {
            store,
            public_base: public_base.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> DomainResult<String> {
        self.store.write(key, &bytes).await?;
        Ok(format!("{}/{}", self.public_base.trim_end_matches('/'), key))
    }
}
