// src/infrastructure/media/local_storage.rs
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::media::MediaStorage,
};
use crate::domain::media::ImageRef;

/// Stores media as plain files below a root directory.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `ImageRef` only admits normal relative components, so the joined path
    /// never leaves the root.
    fn path_of(&self, file: &ImageRef) -> PathBuf {
        self.root.join(file.as_str())
    }
}

fn map_io(file: &ImageRef, err: std::io::Error) -> ApplicationError {
    if err.kind() == ErrorKind::NotFound {
        ApplicationError::not_found(format!("media file '{file}'"))
    } else {
        ApplicationError::infrastructure(format!("media file '{file}': {err}"))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn exists(&self, file: &ImageRef) -> ApplicationResult<bool> {
        tokio::fs::try_exists(self.path_of(file))
            .await
            .map_err(|err| map_io(file, err))
    }

    async fn read(&self, file: &ImageRef) -> ApplicationResult<Vec<u8>> {
        tokio::fs::read(self.path_of(file))
            .await
            .map_err(|err| map_io(file, err))
    }

    async fn write(&self, file: &ImageRef, bytes: &[u8]) -> ApplicationResult<()> {
        let path = self.path_of(file);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| map_io(file, err))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| map_io(file, err))?;
        tracing::debug!(file = %file, bytes = bytes.len(), "media file written");
        Ok(())
    }
}
