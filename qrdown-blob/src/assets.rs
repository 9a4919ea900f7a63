use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::adapter::Presence;
use crate::keys::file_extension;
use crate::{BlobAdapter, BlobConfig, DocumentId, PutObject, RepoError};

/// Where a document's logo can be fetched from, if it has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Epoch milliseconds at lookup time, for cache busting only
    pub timestamp: i64,
}

impl LogoInfo {
    fn found(url: String, path: String) -> Self {
        Self {
            url: Some(url),
            path: Some(path),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    fn absent() -> Self {
        Self {
            url: None,
            path: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.path.is_some()
    }
}

/// Binary uploads attached to a document: arbitrary files and the logo
#[derive(Clone)]
pub struct AssetRepository {
    blobs: BlobAdapter,
    config: BlobConfig,
}

impl AssetRepository {
    pub fn new(blobs: BlobAdapter, config: BlobConfig) -> Self {
        Self { blobs, config }
    }

    pub fn config(&self) -> &BlobConfig {
        &self.config
    }

    /// Public URL of a key returned by one of the upload methods
    pub fn public_url(&self, key: &str) -> String {
        self.blobs.public_url(key)
    }

    async fn write(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), RepoError> {
        let size = bytes.len();
        let object = PutObject::new(bytes)
            .with_content_type(content_type)
            .with_content_disposition(self.config.asset_content_disposition.as_str());

        match self.blobs.put(key, object).await {
            Ok(result) => {
                info!(%key, content_type, size, etag = ?result.etag, "asset uploaded");
                Ok(())
            }
            Err(err) => {
                error!(%key, error = %err, "asset upload failed");
                Err(RepoError::upload_failed(err))
            }
        }
    }

    fn ensure_not_empty(bytes: &Bytes) -> Result<(), RepoError> {
        if bytes.is_empty() {
            return Err(RepoError::validation("Empty file buffer received"));
        }
        Ok(())
    }

    /// Store a file under `{id}/{filename}`, replacing any previous upload of
    /// the same name. Returns the key written.
    pub async fn upload_generic<B: Into<Bytes>>(
        &self,
        id: &DocumentId,
        filename: &str,
        bytes: B,
        content_type: &str,
    ) -> Result<String, RepoError> {
        let bytes = bytes.into();
        Self::ensure_not_empty(&bytes)?;

        let key = self.blobs.keys().asset_key(id, filename);
        self.write(&key, bytes, content_type).await?;
        Ok(key)
    }

    /// Store the document's logo, keeping the uploaded file's extension.
    /// Returns the key written.
    pub async fn upload_logo<B: Into<Bytes>>(
        &self,
        id: &DocumentId,
        bytes: B,
        original_filename: &str,
        content_type: &str,
    ) -> Result<String, RepoError> {
        let bytes = bytes.into();
        Self::ensure_not_empty(&bytes)?;

        let key = self
            .blobs
            .keys()
            .logo_key(id, file_extension(original_filename));
        self.write(&key, bytes, content_type).await?;
        Ok(key)
    }

    /// Look up the document's logo under the configured extensions.
    ///
    /// With the default configuration only `{id}/logo.jpg` is checked, so a
    /// logo uploaded as `.png` is reported absent. Never fails.
    pub async fn get_logo(&self, id: &DocumentId) -> LogoInfo {
        let keys = self
            .blobs
            .keys()
            .logo_probe_keys(id, &self.config.logo_probe_extensions);

        for key in keys {
            match self.blobs.probe(&key).await {
                Presence::Present => {
                    let url = self.blobs.public_url(&key);
                    return LogoInfo::found(url, key);
                }
                // already logged by the adapter
                Presence::Absent | Presence::Unknown(_) => continue,
            }
        }

        LogoInfo::absent()
    }
}
