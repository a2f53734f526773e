//! The school API as consumed by client-side view models.

use std::future::Future;

use crate::domain::{ImageUpload, School, SchoolForm, SchoolId};
use crate::error::Result;

/// Remote school directory.
pub trait SchoolApi: Send + Sync {
    /// Fetch every school, newest first.
    fn list_schools(&self) -> impl Future<Output = Result<Vec<School>>> + Send;

    /// Submit a registration and return the new school's id.
    fn create_school(
        &self,
        form: &SchoolForm,
        image: Option<&ImageUpload>,
    ) -> impl Future<Output = Result<SchoolId>> + Send;
}
