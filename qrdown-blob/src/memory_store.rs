use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::store::{ObjectHead, PutResult};
use crate::{BlobError, BlobResult, BlobStore, PutObject, StoredObject};

/// In-memory object store for tests and local development.
///
/// Clones share the same objects. Writes are last-write-wins, like a bucket.
#[derive(Clone)]
pub struct MemoryBlobStore {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    public_base: String,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::with_public_base("memory://")
    }

    pub fn with_public_base<S: Into<String>>(base: S) -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            public_base: base.into(),
        }
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<String, StoredObject>> {
        // Every mutation is a single insert, so a poisoned map is still consistent
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects().contains_key(key)
    }

    /// Sorted list of stored keys
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Snapshot of a stored object, bypassing the store API
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects().get(key).cloned()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, object: PutObject) -> BlobResult<PutResult> {
        let size_bytes = object.size_bytes();
        let stored = StoredObject {
            body: object.body,
            content_type: object.content_type,
            content_disposition: object.content_disposition,
            metadata: object.metadata,
        };
        self.objects().insert(key.to_string(), stored);

        Ok(PutResult {
            etag: None,
            size_bytes,
        })
    }

    async fn get(&self, key: &str) -> BlobResult<StoredObject> {
        self.objects()
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::not_found(key))
    }

    async fn head(&self, key: &str) -> BlobResult<ObjectHead> {
        let objects = self.objects();
        let object = objects.get(key).ok_or_else(|| BlobError::not_found(key))?;

        Ok(ObjectHead {
            size_bytes: object.body.len() as u64,
            content_type: object.content_type.clone(),
            etag: None,
            last_modified: None,
            metadata: object.metadata.clone(),
        })
    }

    fn public_url(&self, key: &str) -> String {
        if self.public_base.ends_with('/') {
            format!("{}{}", self.public_base, key)
        } else {
            format!("{}/{}", self.public_base, key)
        }
    }
}
