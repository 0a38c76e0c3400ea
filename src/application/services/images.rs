// src/application/services/images.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::media::{EncodeOptions, ImageCodec, MediaStorage},
};
use crate::domain::media::{ImageRef, TargetWidth};

/// What happened to an image after its owner was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// No image, or the same reference as before the save.
    Skipped,
    AlreadyWithinWidth,
    Resized { width: u32, height: u32 },
    MissingFile,
    Failed(String),
}

/// Downscales newly referenced images so they fit a target width.
///
/// Runs after the owning record has been written. Every failure is logged
/// and reported through [`NormalizeOutcome`]; none of them fail the save.
pub struct ImageNormalizer {
    storage: Arc<dyn MediaStorage>,
    codec: Arc<dyn ImageCodec>,
    options: EncodeOptions,
}

impl ImageNormalizer {
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        codec: Arc<dyn ImageCodec>,
        options: EncodeOptions,
    ) -> Self {
        Self {
            storage,
            codec,
            options,
        }
    }

    pub async fn normalize_on_save(
        &self,
        previous: Option<&ImageRef>,
        current: Option<&ImageRef>,
        target: TargetWidth,
    ) -> NormalizeOutcome {
        let Some(current) = current else {
            return NormalizeOutcome::Skipped;
        };
        if previous == Some(current) {
            return NormalizeOutcome::Skipped;
        }

        match self.resize_if_wider(current, target).await {
            Ok(outcome) => {
                tracing::debug!(image = %current, target = target.get(), ?outcome, "image normalised");
                outcome
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(image = %current, "image file not found, skipping resize");
                NormalizeOutcome::MissingFile
            }
            Err(err) => {
                tracing::warn!(image = %current, error = %err, "image resize failed");
                NormalizeOutcome::Failed(err.to_string())
            }
        }
    }

    async fn resize_if_wider(
        &self,
        image: &ImageRef,
        target: TargetWidth,
    ) -> ApplicationResult<NormalizeOutcome> {
        if !self.storage.exists(image).await? {
            return Err(ApplicationError::not_found(image.to_string()));
        }
        let bytes = self.storage.read(image).await?;

        let codec = Arc::clone(&self.codec);
        let options = self.options;
        let resized = tokio::task::spawn_blocking(move || -> ApplicationResult<Option<_>> {
            let info = codec.inspect(&bytes)?;
            if info.width <= target.get() {
                return Ok(None);
            }
            let height = target.scaled_height(info.width, info.height);
            let encoded = codec.resize(&bytes, target.get(), height, &options)?;
            Ok(Some((encoded, height)))
        })
        .await
        .map_err(|err| ApplicationError::infrastructure(format!("image task failed: {err}")))??;

        match resized {
            None => Ok(NormalizeOutcome::AlreadyWithinWidth),
            Some((encoded, height)) => {
                self.storage.write(image, &encoded).await?;
                Ok(NormalizeOutcome::Resized {
                    width: target.get(),
                    height,
                })
            }
        }
    }
}
