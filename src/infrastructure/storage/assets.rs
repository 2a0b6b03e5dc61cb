//! Image files on local disk, addressed by a single file name under a root
//! directory.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;
use uuid::Uuid;

use crate::shared::DomainError;

/// Read size used when streaming a file to the client.
pub const CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for DomainError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidName(name) => {
                DomainError::Validation(format!("invalid file name: {:?}", name))
            }
            StorageError::NotFound(name) => DomainError::not_found("File", "name", name),
            StorageError::Io(e) => DomainError::Storage(e.to_string()),
        }
    }
}

/// An opened file ready to be streamed.
#[derive(Debug)]
pub struct Asset {
    pub file: File,
    pub content_type: String,
    pub len: Option<u64>,
}

impl Asset {
    pub fn into_stream(self) -> ReaderStream<File> {
        ReaderStream::with_capacity(self.file, CHUNK_SIZE)
    }
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `name` onto the root. Anything but a plain file name is refused,
    /// so the result can never leave the root directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    pub async fn open(&self, name: &str) -> Result<Asset, StorageError> {
        let path = self.resolve(name)?;
        let file = File::open(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::Io(e),
        })?;
        let len = file.metadata().await.ok().map(|m| m.len());

        Ok(Asset {
            file,
            content_type: content_type_for(name),
            len,
        })
    }

    /// Writes `bytes` as `name`, replacing any existing file.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.resolve(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Stored file");
        Ok(path)
    }

    /// Stores `bytes` under a fresh random name ending in `suffix` (".png")
    /// and returns that name.
    pub async fn save(&self, suffix: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let name = unique_name(suffix);
        self.write(&name, bytes).await?;
        Ok(name)
    }
}

pub fn unique_name(suffix: &str) -> String {
    format!("{}{}", Uuid::new_v4().simple(), suffix)
}

fn validate_name(name: &str) -> Result<(), StorageError> {
    let invalid = || StorageError::InvalidName(name.to_string());

    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']) {
        return Err(invalid());
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

/// `image/<ext>` for the extension after the last dot, lower-cased.
/// Names without an extension are served as `application/octet-stream`.
pub fn content_type_for(name: &str) -> String {
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => return "application/octet-stream".to_string(),
    };

    match ext.as_str() {
        "jpg" => "image/jpeg".to_string(),
        "svg" => "image/svg+xml".to_string(),
        _ => format!("image/{}", ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn traversal_names_are_rejected() {
        let store = AssetStore::new("/srv/images");
        for name in [
            "../etc/passwd",
            "..",
            "a/../../b.png",
            "sub/a.png",
            "..\\secret.png",
            "/etc/passwd",
            "./a.png",
            ".hidden",
            "",
        ] {
            assert!(
                matches!(store.resolve(name), Err(StorageError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn plain_names_resolve_under_root() {
        let store = AssetStore::new("/srv/images");
        assert_eq!(
            store.resolve("lake.jpg").unwrap(),
            PathBuf::from("/srv/images/lake.jpg")
        );
        assert!(store.resolve("a..b.png").is_ok());
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.b.gif"), "image/gif");
        assert_eq!(content_type_for("icon.svg"), "image/svg+xml");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
        assert_eq!(content_type_for("trailing."), "application/octet-stream");
    }

    #[tokio::test]
    async fn saved_file_streams_back_in_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("nested"));
        let payload: Vec<u8> = (0..(CHUNK_SIZE * 2 + 10)).map(|i| (i % 251) as u8).collect();

        let name = store.save(".png", &payload).await.unwrap();
        assert!(name.ends_with(".png"));

        let asset = store.open(&name).await.unwrap();
        assert_eq!(asset.content_type, "image/png");
        assert_eq!(asset.len, Some(payload.len() as u64));

        let chunks: Vec<_> = asset.into_stream().collect().await;
        assert!(chunks.len() >= 3);
        let bytes: Vec<u8> = chunks
            .into_iter()
            .flat_map(|c| c.unwrap().to_vec())
            .collect();
        assert_eq!(bytes, payload);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        assert!(matches!(
            store.open("nope.png").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
