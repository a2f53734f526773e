//! Uploaded school images: policy checks and stored filenames.

use std::path::Path;

use chrono::{DateTime, Utc};

use super::error::UploadError;

/// Default upload ceiling: 5 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Content types accepted when no allow-list is configured.
pub const DEFAULT_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// An image received from a client, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Filename as sent by the client, if any.
    pub original_name: Option<String>,
    /// Normalized content type (lowercase, no parameters).
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(original_name: Option<String>, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            original_name,
            content_type: normalize_content_type(content_type),
            bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Size and type limits applied to every upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_types: DEFAULT_IMAGE_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: u64, allowed_types: Vec<String>) -> Self {
        Self {
            max_bytes,
            allowed_types: allowed_types
                .iter()
                .map(|t| normalize_content_type(t))
                .collect(),
        }
    }

    /// Reject content types outside the allow-list.
    pub fn check_content_type(&self, content_type: &str) -> Result<(), UploadError> {
        let normalized = normalize_content_type(content_type);
        if self.allowed_types.iter().any(|t| *t == normalized) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedType {
                content_type: normalized,
            })
        }
    }

    /// Reject sizes above the ceiling.
    pub fn check_size(&self, len: u64) -> Result<(), UploadError> {
        if len > self.max_bytes {
            Err(UploadError::TooLarge {
                max_bytes: self.max_bytes,
            })
        } else {
            Ok(())
        }
    }

    /// Apply both checks to a buffered upload.
    pub fn check(&self, upload: &ImageUpload) -> Result<(), UploadError> {
        self.check_content_type(&upload.content_type)?;
        self.check_size(upload.len())
    }
}

/// Lowercase a content type and drop any `;`-parameters.
#[must_use]
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Canonical file extension (with dot) for an image content type.
#[must_use]
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match normalize_content_type(content_type).as_str() {
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// Content type implied by a file path's extension.
#[must_use]
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Extension (with dot) for a stored upload.
///
/// The client's extension survives only when it names the same image type
/// as the upload's content type. Anything else gets the content type's
/// canonical extension, or none when the type has no known extension.
#[must_use]
pub fn stored_extension(original_name: Option<&str>, content_type: &str) -> String {
    let canonical = extension_for_content_type(content_type);
    let original = original_name
        .map(Path::new)
        .filter(|path| {
            canonical.is_some()
                && content_type_for_path(path).and_then(extension_for_content_type) == canonical
        })
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str());

    match original {
        Some(ext) => format!(".{ext}"),
        None => canonical.unwrap_or_default().to_string(),
    }
}

/// Filename for a stored upload: `school-<unix-millis>-<suffix><ext>`.
#[must_use]
pub fn stored_filename(upload: &ImageUpload, now: DateTime<Utc>, suffix: u32) -> String {
    format!(
        "school-{}-{}{}",
        now.timestamp_millis(),
        suffix,
        stored_extension(upload.original_name.as_deref(), &upload.content_type)
    )
}
