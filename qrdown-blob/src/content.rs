use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::adapter::Presence;
use crate::{BlobAdapter, BlobConfig, BlobError, DocumentId, DocumentMetadata, PutObject, RepoError};

/// Receipt returned after a document write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertReceipt {
    pub id: DocumentId,
    pub url: String,
    pub font: String,
}

/// A document as read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub id: DocumentId,
    pub content: String,
    pub content_type: Option<String>,
    pub metadata: DocumentMetadata,
}

/// Result of reading a document, keeping real absence apart from store failures
#[derive(Debug)]
pub enum ReadOutcome {
    Found(MarkdownDocument),
    NotFound,
    TransientError(BlobError),
}

impl ReadOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ReadOutcome::Found(_))
    }

    pub fn into_document(self) -> Option<MarkdownDocument> {
        match self {
            ReadOutcome::Found(doc) => Some(doc),
            _ => None,
        }
    }
}

/// Wire shape of a document read. A miss of any kind is the all-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedDocument {
    pub content: String,
    pub id: Option<DocumentId>,
    pub content_type: Option<String>,
    pub font: Option<String>,
}

impl FetchedDocument {
    pub fn empty() -> Self {
        Self {
            content: String::new(),
            id: None,
            content_type: None,
            font: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

impl From<ReadOutcome> for FetchedDocument {
    fn from(outcome: ReadOutcome) -> Self {
        match outcome {
            ReadOutcome::Found(doc) => Self {
                content: doc.content,
                id: Some(doc.id),
                content_type: doc.content_type,
                font: Some(doc.metadata.font),
            },
            ReadOutcome::NotFound | ReadOutcome::TransientError(_) => Self::empty(),
        }
    }
}

/// Stores one Markdown document per id, with its font as object metadata.
///
/// Stateless: every call derives the key and goes to the store.
#[derive(Clone)]
pub struct ContentRepository {
    blobs: BlobAdapter,
    config: BlobConfig,
}

impl ContentRepository {
    pub fn new(blobs: BlobAdapter, config: BlobConfig) -> Self {
        Self { blobs, config }
    }

    pub fn config(&self) -> &BlobConfig {
        &self.config
    }

    fn resolve_font(&self, font: Option<&str>) -> String {
        font.filter(|f| !f.is_empty())
            .unwrap_or(self.config.default_font.as_str())
            .to_string()
    }

    /// Create or fully overwrite the document stored under `id`.
    ///
    /// The existence probe only decides what gets logged; the write is
    /// unconditional. Concurrent writers race at the store, last write wins.
    pub async fn upsert(
        &self,
        id: &DocumentId,
        content: &str,
        font: Option<&str>,
    ) -> Result<UpsertReceipt, RepoError> {
        let key = self.blobs.keys().content_key(id);

        if self.blobs.exists(&key).await {
            info!(%id, %key, "content already exists, overwriting");
        } else {
            info!(%id, %key, "creating new content");
        }

        let metadata = DocumentMetadata::new(self.resolve_font(font));
        let object = PutObject::new(content.to_string())
            .with_content_type(self.config.markdown_content_type.as_str())
            .with_metadata(metadata.to_object_metadata());

        if let Err(err) = self.blobs.put(&key, object).await {
            error!(%id, %key, error = %err, "failed to save content");
            return Err(RepoError::persistence(key, err));
        }

        Ok(UpsertReceipt {
            id: id.clone(),
            url: self.blobs.public_url(&key),
            font: metadata.font,
        })
    }

    /// Read the document under `id`, distinguishing absence from store failure
    pub async fn read(&self, id: &DocumentId) -> ReadOutcome {
        let key = self.blobs.keys().content_key(id);

        match self.blobs.probe(&key).await {
            Presence::Present => {}
            Presence::Absent => return ReadOutcome::NotFound,
            Presence::Unknown(err) => return ReadOutcome::TransientError(err),
        }

        let object = match self.blobs.get(&key).await {
            Ok(object) => object,
            // Removed between the probe and the read
            Err(err) if err.is_not_found() => return ReadOutcome::NotFound,
            Err(err) => {
                warn!(%id, %key, error = %err, "error fetching content");
                return ReadOutcome::TransientError(err);
            }
        };

        let content = String::from_utf8_lossy(&object.body).into_owned();

        ReadOutcome::Found(MarkdownDocument {
            id: id.clone(),
            content,
            content_type: object.content_type,
            metadata: DocumentMetadata::from_object_metadata(&object.metadata, &self.config.default_font),
        })
    }

    /// Read the document under `id`, degrading every kind of miss to an empty result
    pub async fn fetch(&self, id: &DocumentId) -> FetchedDocument {
        self.read(id).await.into()
    }
}
