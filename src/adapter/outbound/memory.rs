//! In-memory stores for tests and throwaway runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::image::stored_filename;
use crate::domain::{ImageUpload, NewSchool, School, SchoolId, UploadPolicy};
use crate::error::{Error, Result};
use crate::port::outbound::image::ImageStore;
use crate::port::outbound::store::SchoolStore;

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    schools: Vec<School>,
}

/// School store backed by a vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Rows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().schools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn insert(&self, school: &NewSchool) -> Result<SchoolId> {
        let mut rows = self.rows.write();
        rows.next_id += 1;
        let id = SchoolId::new(rows.next_id);
        rows.schools.push(school.clone().into_school(id, Utc::now()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<School>> {
        let mut schools = self.rows.read().schools.clone();
        schools.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(schools)
    }
}

/// Image store that keeps bytes in a map keyed by stored filename.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    policy: UploadPolicy,
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            files: RwLock::default(),
        }
    }

    /// Names of every stored image.
    #[must_use]
    pub fn filenames(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.read().get(filename).cloned()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String> {
        self.policy.check(upload)?;

        let mut files = self.files.write();
        loop {
            let name = stored_filename(upload, Utc::now(), rand::random::<u32>() % 1_000_000_000);
            if !files.contains_key(&name) {
                files.insert(name.clone(), upload.bytes.clone());
                return Ok(name);
            }
        }
    }

    async fn remove(&self, filename: &str) -> Result<()> {
        self.files
            .write()
            .remove(filename)
            .map(|_| ())
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no stored image named {filename}"),
                ))
            })
    }
}
