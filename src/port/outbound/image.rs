//! Image persistence port.

use async_trait::async_trait;

use crate::domain::ImageUpload;
use crate::error::Result;

/// Writes uploaded images somewhere they can be served from.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the upload under a freshly generated name and return that name.
    ///
    /// Implementations apply the upload policy before writing anything.
    async fn save(&self, upload: &ImageUpload) -> Result<String>;

    /// Remove a previously stored image.
    async fn remove(&self, filename: &str) -> Result<()>;
}
