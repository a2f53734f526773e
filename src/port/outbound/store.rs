//! Persistence port for schools.

use async_trait::async_trait;

use crate::domain::{NewSchool, School, SchoolId};
use crate::error::Result;

/// Storage operations for the `schools` table.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Insert one row, stamping `created_at`. Returns the assigned id.
    async fn insert(&self, school: &NewSchool) -> Result<SchoolId>;

    /// All rows ordered by `created_at` descending, newest id first on ties.
    async fn list(&self) -> Result<Vec<School>>;
}
