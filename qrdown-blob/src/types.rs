use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Object-store metadata: opaque string pairs attached to an object
pub type ObjectMetadata = HashMap<String, String>;

/// Identifier of a shared document.
///
/// Treated as opaque; in practice the editor hands out 8-digit strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// Create from existing string
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata stored alongside a document's content.
///
/// Only the font is ever recorded, so this is a fixed record rather than a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub font: String,
}

impl DocumentMetadata {
    pub const FONT_KEY: &'static str = "font";

    pub fn new<S: Into<String>>(font: S) -> Self {
        Self { font: font.into() }
    }

    pub fn to_object_metadata(&self) -> ObjectMetadata {
        let mut metadata = ObjectMetadata::new();
        metadata.insert(Self::FONT_KEY.to_string(), self.font.clone());
        metadata
    }

    /// Read the record back, using `default_font` when the key is missing
    pub fn from_object_metadata(metadata: &ObjectMetadata, default_font: &str) -> Self {
        let font = metadata
            .get(Self::FONT_KEY)
            .filter(|font| !font.is_empty())
            .cloned()
            .unwrap_or_else(|| default_font.to_string());
        Self { font }
    }
}

/// Request to write an object
#[derive(Debug, Clone, Default)]
pub struct PutObject {
    pub body: Bytes,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub metadata: ObjectMetadata,
}

impl PutObject {
    pub fn new<B: Into<Bytes>>(body: B) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_content_disposition<S: Into<String>>(mut self, disposition: S) -> Self {
        self.content_disposition = Some(disposition.into());
        self
    }

    pub fn with_metadata(mut self, metadata: ObjectMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn size_bytes(&self) -> u64 {
        self.body.len() as u64
    }
}

/// An object read back from the store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub metadata: ObjectMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_round_trips_through_object_metadata() {
        let stored = DocumentMetadata::new("mono").to_object_metadata();
        assert_eq!(stored.get("font").map(String::as_str), Some("mono"));
        assert_eq!(DocumentMetadata::from_object_metadata(&stored, "default").font, "mono");
    }

    #[test]
    fn blank_font_falls_back() {
        let mut stored = ObjectMetadata::new();
        stored.insert("font".to_string(), String::new());
        assert_eq!(DocumentMetadata::from_object_metadata(&stored, "default").font, "default");
        assert_eq!(
            DocumentMetadata::from_object_metadata(&ObjectMetadata::new(), "default").font,
            "default"
        );
    }

    #[test]
    fn document_id_serializes_as_plain_string() {
        let id = DocumentId::from("12345678");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12345678\"");
        assert_eq!(id.to_string(), "12345678");
    }
}
