//! School registration service.
//!
//! ```text
//! SchoolForm + Option<ImageUpload>
//!        |
//!        +-- validate()          (presence, then field rules)
//!        +-- ImageStore::save    (policy check, unique filename)
//!        +-- SchoolStore::insert (on failure the image is removed)
//!        v
//!     SchoolId
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{validate, ImageUpload, School, SchoolForm, SchoolId};
use crate::error::Result;
use crate::port::inbound::registry::SchoolRegistry;
use crate::port::outbound::image::ImageStore;
use crate::port::outbound::store::SchoolStore;

/// Create and list schools against a store and an image store.
#[derive(Clone)]
pub struct SchoolService {
    store: Arc<dyn SchoolStore>,
    images: Arc<dyn ImageStore>,
}

impl SchoolService {
    pub fn new(store: Arc<dyn SchoolStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }
}

#[async_trait]
impl SchoolRegistry for SchoolService {
    async fn create(&self, form: SchoolForm, image: Option<ImageUpload>) -> Result<SchoolId> {
        let school = validate(&form)?;

        let stored = match image.filter(|upload| !upload.is_empty()) {
            Some(upload) => Some(self.images.save(&upload).await?),
            None => None,
        };

        match self.store.insert(&school.with_image(stored.clone())).await {
            Ok(id) => {
                info!(school_id = %id, image = ?stored, "School added");
                Ok(id)
            }
            Err(err) => {
                if let Some(file) = stored {
                    if let Err(remove_err) = self.images.remove(&file).await {
                        warn!(file = %file, error = %remove_err, "Failed to remove orphaned image");
                    }
                }
                Err(err)
            }
        }
    }

    async fn list(&self) -> Result<Vec<School>> {
        self.store.list().await
    }
}
