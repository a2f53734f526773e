//! Filesystem image store.
//!
//! Files land directly under the upload directory with generated names, so
//! the HTTP adapter can serve the directory as-is.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::image::stored_filename;
use crate::domain::{ImageUpload, UploadPolicy};
use crate::error::{Error, Result};
use crate::port::outbound::image::ImageStore;

/// Attempts made before giving up on finding a free filename.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Image store writing into a local directory.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
    policy: UploadPolicy,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>, policy: UploadPolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename);
        let plain = name.file_name().is_some_and(|n| n == name.as_os_str());
        if !plain {
            return Err(Error::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("not a stored image name: {filename}"),
            )));
        }
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String> {
        self.policy.check(upload)?;
        fs::create_dir_all(&self.dir).await?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let suffix = rand::thread_rng().gen_range(0..1_000_000_000);
            let name = stored_filename(upload, Utc::now(), suffix);
            let path = self.dir.join(&name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, &upload.bytes).await {
                drop(file);
                discard_partial(&path).await;
                return Err(e);
            }

            debug!(file = %name, bytes = upload.len(), "Stored image");
            return Ok(name);
        }

        Err(Error::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "could not find a free image filename",
        )))
    }

    async fn remove(&self, filename: &str) -> Result<()> {
        let path = self.resolve(filename)?;
        fs::remove_file(path).await?;
        Ok(())
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove partial image");
    }
}
