/// Configuration shared by the content and asset repositories
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Content type stamped on every Markdown document write
    pub markdown_content_type: String,

    /// Font recorded when a write does not name one
    pub default_font: String,

    /// `Content-Disposition` attached to uploaded assets
    pub asset_content_disposition: String,

    /// Extensions tried, in order, when looking up a document's logo.
    /// Uploads keep their own extension, so anything not listed here
    /// is invisible to `get_logo`.
    pub logo_probe_extensions: Vec<String>,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            markdown_content_type: "text/markdown".to_string(),
            default_font: "default".to_string(),
            asset_content_disposition: "inline".to_string(),
            logo_probe_extensions: vec!["jpg".to_string()],
        }
    }
}

impl BlobConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Markdown content type
    pub fn with_markdown_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.markdown_content_type = content_type.into();
        self
    }

    /// Set the fallback font
    pub fn with_default_font<S: Into<String>>(mut self, font: S) -> Self {
        self.default_font = font.into();
        self
    }

    /// Set the asset content disposition
    pub fn with_asset_content_disposition<S: Into<String>>(mut self, disposition: S) -> Self {
        self.asset_content_disposition = disposition.into();
        self
    }

    /// Replace the logo lookup extensions. An empty list keeps the default.
    pub fn with_logo_probe_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(Into::into)
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        if !extensions.is_empty() {
            self.logo_probe_extensions = extensions;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_extensions_are_normalized() {
        let config = BlobConfig::default().with_logo_probe_extensions([".jpg", " png ", ""]);
        assert_eq!(config.logo_probe_extensions, vec!["jpg", "png"]);
    }

    #[test]
    fn empty_probe_list_keeps_default() {
        let config = BlobConfig::default().with_logo_probe_extensions(Vec::<String>::new());
        assert_eq!(config.logo_probe_extensions, vec!["jpg"]);
    }
}
