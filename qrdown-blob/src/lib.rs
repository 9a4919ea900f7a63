//! # qrdown-blob: persistence for shared Markdown documents
//!
//! Maps a document id onto objects in a key/value object store (S3 or any
//! backend implementing [`BlobStore`]) and owns the read/write contracts the
//! HTTP layer relies on:
//!
//! - **Idempotent upsert**: a document write always fully replaces the
//!   previous content and font
//! - **Soft-miss reads**: a missing or unreadable document comes back as an
//!   empty result, never as an error
//! - **Asset uploads**: arbitrary files and a per-document logo, with empty
//!   uploads rejected before the store is touched
//!
//! ## Layout
//!
//! ```text
//! {id}/content.md        Markdown, metadata `font`
//! {id}/logo.{ext}        logo, extension taken from the upload
//! {id}/{filename}        any other upload
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qrdown_blob::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), RepoError> {
//! let blobs = BlobAdapter::new(MemoryBlobStore::new());
//! let documents = ContentRepository::new(blobs.clone(), BlobConfig::default());
//!
//! let id = DocumentId::from("12345678");
//! documents.upsert(&id, "# Hello", Some("serif")).await?;
//!
//! let doc = documents.fetch(&id).await;
//! assert_eq!(doc.content, "# Hello");
//! assert_eq!(doc.font.as_deref(), Some("serif"));
//! # Ok(())
//! # }
//! ```

pub mod adapter;
mod assets;
mod config;
mod content;
mod error;
pub mod keys;
mod memory_store;
mod s3_store;
pub mod store;
mod types;

// Re-export main types for clean API
pub use adapter::{BlobAdapter, Presence};
pub use assets::{AssetRepository, LogoInfo};
pub use config::BlobConfig;
pub use content::{ContentRepository, FetchedDocument, MarkdownDocument, ReadOutcome, UpsertReceipt};
pub use error::{BlobError, BlobResult, RepoError};
pub use keys::{DefaultKeyStrategy, DocumentKeyStrategy};
pub use memory_store::MemoryBlobStore;
pub use s3_store::{S3CompatibleStore, S3Config};
pub use store::{BlobStore, ObjectHead, PutResult};
pub use types::{DocumentId, DocumentMetadata, ObjectMetadata, PutObject, StoredObject};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AssetRepository, BlobAdapter, BlobConfig, BlobError, BlobStore, ContentRepository,
        DocumentId, FetchedDocument, LogoInfo, MemoryBlobStore, RepoError,
    };
}
