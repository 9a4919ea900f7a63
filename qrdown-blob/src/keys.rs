use crate::DocumentId;

/// Strategy for laying out a document's objects in the store
pub trait DocumentKeyStrategy: Send + Sync {
    /// Key of the document's Markdown content
    fn content_key(&self, id: &DocumentId) -> String;

    /// Key of an uploaded file, named after the upload
    fn asset_key(&self, id: &DocumentId, filename: &str) -> String;

    /// Key a logo is written to
    fn logo_key(&self, id: &DocumentId, extension: Option<&str>) -> String;

    /// Keys probed, in order, when looking a logo up
    fn logo_probe_keys(&self, id: &DocumentId, extensions: &[String]) -> Vec<String> {
        extensions
            .iter()
            .map(|ext| self.logo_key(id, Some(ext)))
            .collect()
    }
}

/// Default layout: everything for a document lives under `{id}/`
///
/// ```text
/// {id}/content.md
/// {id}/logo.{ext}
/// {id}/{filename}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyStrategy;

impl DefaultKeyStrategy {
    const CONTENT_FILE: &'static str = "content.md";
    const LOGO_BASENAME: &'static str = "logo";
}

impl DocumentKeyStrategy for DefaultKeyStrategy {
    fn content_key(&self, id: &DocumentId) -> String {
        format!("{}/{}", id, Self::CONTENT_FILE)
    }

    fn asset_key(&self, id: &DocumentId, filename: &str) -> String {
        format!("{}/{}", id, filename)
    }

    fn logo_key(&self, id: &DocumentId, extension: Option<&str>) -> String {
        match extension {
            Some(ext) => format!("{}/{}.{}", id, Self::LOGO_BASENAME, ext),
            None => format!("{}/{}", id, Self::LOGO_BASENAME),
        }
    }
}

/// Extension of `filename`: whatever follows the last `.`.
///
/// `None` when there is no dot or nothing after it.
pub fn file_extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> DocumentId {
        DocumentId::from("12345678")
    }

    #[test]
    fn content_key_is_fixed_per_document() {
        assert_eq!(DefaultKeyStrategy.content_key(&id()), "12345678/content.md");
    }

    #[test]
    fn asset_key_keeps_filename_verbatim() {
        assert_eq!(
            DefaultKeyStrategy.asset_key(&id(), "My Photo.final.PNG"),
            "12345678/My Photo.final.PNG"
        );
    }

    #[test]
    fn logo_key_preserves_upload_extension() {
        assert_eq!(DefaultKeyStrategy.logo_key(&id(), Some("png")), "12345678/logo.png");
        assert_eq!(DefaultKeyStrategy.logo_key(&id(), None), "12345678/logo");
    }

    #[test]
    fn logo_probe_keys_follow_extension_order() {
        let exts = vec!["jpg".to_string(), "png".to_string()];
        assert_eq!(
            DefaultKeyStrategy.logo_probe_keys(&id(), &exts),
            vec!["12345678/logo.jpg", "12345678/logo.png"]
        );
    }

    #[test]
    fn file_extension_takes_last_segment() {
        assert_eq!(file_extension("brand.logo.svg"), Some("svg"));
        assert_eq!(file_extension("logo.JPG"), Some("JPG"));
        assert_eq!(file_extension("logo"), None);
        assert_eq!(file_extension("logo."), None);
        assert_eq!(file_extension(".png"), Some("png"));
    }
}
