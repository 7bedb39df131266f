//! Embedded images (client photos, page backgrounds).

use std::collections::HashMap;

/// Identifier of an embedded resource, unique within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

/// Map of resource IDs to resources.
pub type ResourceMap = HashMap<ResourceId, Resource>;

/// An embedded binary resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Original filename, if known.
    pub name: Option<String>,
    /// MIME type.
    pub mime_type: String,
    /// Raw data.
    pub data: Vec<u8>,
}

impl ResourceId {
    /// Create a resource ID from a string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Resource {
    /// Create a new resource.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: None,
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Set the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Create a PNG image resource.
    pub fn png(data: Vec<u8>) -> Self {
        Self::new("image/png", data)
    }

    /// Create a JPEG image resource.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new("image/jpeg", data)
    }

    /// Create an image resource, detecting the type from its leading bytes.
    ///
    /// Returns `None` when the data is not a PNG, JPEG, GIF or WebP image.
    pub fn image(data: Vec<u8>) -> Option<Self> {
        let mime = sniff_image_type(&data)?;
        Some(Self::new(mime, data))
    }

    /// Check whether the MIME type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

fn sniff_image_type(data: &[u8]) -> Option<&'static str> {
    match data {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_sniffing() {
        let png = Resource::image(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A]);
        assert_eq!(png.map(|r| r.mime_type), Some("image/png".to_string()));

        let jpeg = Resource::image(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(jpeg.map(|r| r.mime_type), Some("image/jpeg".to_string()));

        assert!(Resource::image(b"not an image".to_vec()).is_none());
        assert!(Resource::image(Vec::new()).is_none());
    }
}
