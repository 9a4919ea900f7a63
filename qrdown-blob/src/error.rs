use thiserror::Error;

/// Result type for blob store operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors raised by a [`BlobStore`](crate::BlobStore) backend
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Blob not found: {key}")]
    NotFound { key: String },

    #[error("Storage backend error: {source}")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BlobError {
    /// Create a backend error from any error type
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(error),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors surfaced by the content and asset repositories.
///
/// Reads never produce one of these; they degrade to a soft miss instead.
#[derive(Error, Debug)]
pub enum RepoError {
    /// Input rejected before touching the store, or an asset upload the
    /// store refused. The store failure, if any, is kept as the source.
    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BlobError>,
    },

    /// The store rejected or failed a document write
    #[error("Failed to save content at {key}: {source}")]
    Persistence {
        key: String,
        #[source]
        source: BlobError,
    },
}

impl RepoError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Collapse a store failure during an asset upload into a validation error
    pub fn upload_failed(source: BlobError) -> Self {
        Self::Validation {
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn persistence<S: Into<String>>(key: S, source: BlobError) -> Self {
        Self::Persistence {
            key: key.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
