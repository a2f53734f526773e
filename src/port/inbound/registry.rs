//! School registration use cases.

use async_trait::async_trait;

use crate::domain::{ImageUpload, School, SchoolForm, SchoolId};
use crate::error::Result;

/// Create and list schools.
#[async_trait]
pub trait SchoolRegistry: Send + Sync {
    /// Validate a submission, persist its image, and insert one row.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`](crate::error::Error::Validation) when a field
    ///   is missing or breaks a rule
    /// - [`Error::Upload`](crate::error::Error::Upload) when the image breaks
    ///   the upload policy
    /// - I/O or database errors when persistence fails
    async fn create(&self, form: SchoolForm, image: Option<ImageUpload>) -> Result<SchoolId>;

    /// Every school, newest first.
    async fn list(&self) -> Result<Vec<School>>;
}
