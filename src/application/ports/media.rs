// src/application/ports/media.rs
use crate::application::ApplicationResult;
use crate::domain::media::ImageRef;
use async_trait::async_trait;

/// Byte storage for uploaded files, addressed by their reference name.
///
/// `read` and `write` report a missing file as
/// [`ApplicationError::NotFound`](crate::application::error::ApplicationError::NotFound).
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn exists(&self, file: &ImageRef) -> ApplicationResult<bool>;
    async fn read(&self, file: &ImageRef) -> ApplicationResult<Vec<u8>>;
    /// Creates or overwrites the file, including missing parent directories.
    async fn write(&self, file: &ImageRef, bytes: &[u8]) -> ApplicationResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Ico,
}

impl SourceFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Ico => "ico",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: SourceFormat,
}

/// Encoder settings for rewritten images. `quality` and `progressive` only
/// affect JPEG output; `optimize` selects the strongest lossless compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub quality: u8,
    pub optimize: bool,
    pub progressive: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: 60,
            optimize: true,
            progressive: true,
        }
    }
}

/// CPU bound image operations. Callers run these on the blocking pool.
pub trait ImageCodec: Send + Sync {
    /// Reads the header only. Undecodable input is a validation error.
    fn inspect(&self, bytes: &[u8]) -> ApplicationResult<ImageInfo>;
    /// Resamples to exactly `width`x`height` and re-encodes in the source format.
    fn resize(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        options: &EncodeOptions,
    ) -> ApplicationResult<Vec<u8>>;
}
