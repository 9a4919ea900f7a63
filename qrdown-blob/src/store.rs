use async_trait::async_trait;

use crate::{BlobResult, ObjectMetadata, PutObject, StoredObject};

/// Object storage primitives - must be implemented by all storage backends.
///
/// Every call is a single round trip. Implementations do not cache or retry.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write an object, replacing whatever was stored at `key`
    async fn put(&self, key: &str, object: PutObject) -> BlobResult<PutResult>;

    /// Read an object. Returns `BlobError::NotFound` when nothing is stored at `key`.
    async fn get(&self, key: &str) -> BlobResult<StoredObject>;

    /// Metadata-only probe. Returns `BlobError::NotFound` when nothing is stored at `key`.
    async fn head(&self, key: &str) -> BlobResult<ObjectHead>;

    /// Public URL under which the object at `key` is served
    fn public_url(&self, key: &str) -> String;
}

/// Result of a successful put operation
#[derive(Debug, Clone)]
pub struct PutResult {
    pub etag: Option<String>,
    pub size_bytes: u64,
}

/// Metadata about a stored object
#[derive(Debug, Clone, Default)]
pub struct ObjectHead {
    pub size_bytes: u64,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<i64>,
    pub metadata: ObjectMetadata,
}
