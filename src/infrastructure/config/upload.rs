//! Image upload configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::image::{DEFAULT_IMAGE_TYPES, DEFAULT_MAX_IMAGE_BYTES};
use crate::domain::UploadPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory images are written to.
    pub dir: PathBuf,
    /// URL prefix the directory is served under.
    pub public_path: String,
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/schoolImages"),
            public_path: "/schoolImages".into(),
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_types: DEFAULT_IMAGE_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl UploadConfig {
    #[must_use]
    pub fn policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.max_bytes, self.allowed_types.clone())
    }
}
