use qrdown_blob::{AssetRepository, BlobAdapter, BlobConfig, ContentRepository};

/// Repositories shared by every handler.
///
/// Both wrap the same `BlobAdapter`, so the process holds one store client.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentRepository,
    pub assets: AssetRepository,
}

impl AppState {
    pub fn new(blobs: BlobAdapter, config: BlobConfig) -> Self {
        Self {
            content: ContentRepository::new(blobs.clone(), config.clone()),
            assets: AssetRepository::new(blobs, config),
        }
    }
}
