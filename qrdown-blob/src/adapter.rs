use std::sync::Arc;
use tracing::{debug, warn};

use crate::store::PutResult;
use crate::{BlobError, BlobResult, BlobStore, DefaultKeyStrategy, DocumentKeyStrategy, PutObject, StoredObject};

/// Outcome of a metadata-only existence probe
#[derive(Debug)]
pub enum Presence {
    Present,
    Absent,
    /// The probe itself failed; the object may or may not exist
    Unknown(BlobError),
}

impl Presence {
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present)
    }
}

/// Shared handle over one store client and key layout.
///
/// Built once at startup and cloned into each repository; clones share the
/// same underlying client.
#[derive(Clone)]
pub struct BlobAdapter {
    store: Arc<dyn BlobStore>,
    keys: Arc<dyn DocumentKeyStrategy>,
}

impl BlobAdapter {
    /// Create a new blob adapter
    pub fn new<S: BlobStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
            keys: Arc::new(DefaultKeyStrategy),
        }
    }

    /// Create with custom key strategy
    pub fn with_key_strategy<S: BlobStore + 'static, K: DocumentKeyStrategy + 'static>(
        store: S,
        keys: K,
    ) -> Self {
        Self {
            store: Arc::new(store),
            keys: Arc::new(keys),
        }
    }

    /// Wrap an already shared store
    pub fn from_shared(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            keys: Arc::new(DefaultKeyStrategy),
        }
    }

    pub fn keys(&self) -> &dyn DocumentKeyStrategy {
        self.keys.as_ref()
    }

    /// Probe `key` without reading its body.
    ///
    /// Failures other than "not found" are logged and reported as `Unknown`.
    pub async fn probe(&self, key: &str) -> Presence {
        match self.store.head(key).await {
            Ok(_) => Presence::Present,
            Err(err) if err.is_not_found() => {
                debug!(key, "object not found");
                Presence::Absent
            }
            Err(err) => {
                warn!(key, error = %err, "error checking if object exists");
                Presence::Unknown(err)
            }
        }
    }

    /// Best-effort existence check; never fails
    pub async fn exists(&self, key: &str) -> bool {
        self.probe(key).await.is_present()
    }

    /// Full overwrite of `key`
    pub async fn put(&self, key: &str, object: PutObject) -> BlobResult<PutResult> {
        self.store.put(key, object).await
    }

    pub async fn get(&self, key: &str) -> BlobResult<StoredObject> {
        self.store.get(key).await
    }

    pub fn public_url(&self, key: &str) -> String {
        self.store.public_url(key)
    }
}
