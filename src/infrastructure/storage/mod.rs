//! File storage for scenic images and user avatars.

pub mod assets;
pub mod object_storage;

pub use assets::{content_type_for, Asset, AssetStore, StorageError, CHUNK_SIZE};
pub use object_storage::LocalObjectStorage;
