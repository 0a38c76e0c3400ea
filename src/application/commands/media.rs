// src/application/commands/media.rs
use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Datelike;
use uuid::Uuid;

use super::capability::ensure_capability;
use crate::{
    application::{
        dto::{AuthenticatedUser, StoredMediaDto},
        error::{ApplicationError, ApplicationResult},
        ports::{
            media::{ImageCodec, ImageInfo, MediaStorage, SourceFormat},
            time::Clock,
        },
    },
    domain::media::{ImageRef, MediaPurpose},
};

const MAX_EXTENSION_CHARS: usize = 10;

pub struct UploadMediaCommand {
    pub purpose: String,
    pub file_name: String,
    /// Standard base64, without a `data:` prefix.
    pub data_base64: String,
}

pub struct MediaCommandService {
    storage: Arc<dyn MediaStorage>,
    codec: Arc<dyn ImageCodec>,
    clock: Arc<dyn Clock>,
    max_upload_bytes: usize,
}

impl MediaCommandService {
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        codec: Arc<dyn ImageCodec>,
        clock: Arc<dyn Clock>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            storage,
            codec,
            clock,
            max_upload_bytes,
        }
    }

    pub async fn upload(
        &self,
        actor: &AuthenticatedUser,
        command: UploadMediaCommand,
    ) -> ApplicationResult<StoredMediaDto> {
        ensure_capability(actor, "media", "upload")?;
        let purpose: MediaPurpose = command.purpose.parse()?;

        let bytes = self.decode_payload(&command.data_base64)?;

        let info = if purpose.requires_image() {
            Some(self.inspect(bytes.clone()).await?)
        } else {
            None
        };
        if purpose == MediaPurpose::Favicon
            && info.is_some_and(|info| info.format != SourceFormat::Png)
        {
            return Err(ApplicationError::validation("favicon must be a PNG image"));
        }

        let extension = match info {
            Some(info) => info.format.extension().to_string(),
            None => attachment_extension(&command.file_name),
        };
        let now = self.clock.now();
        let reference = ImageRef::new(format!(
            "{}/{:04}/{:02}/{}.{extension}",
            purpose.directory(),
            now.year(),
            now.month(),
            Uuid::new_v4().simple()
        ))?;

        self.storage.write(&reference, &bytes).await?;
        tracing::info!(
            reference = %reference,
            purpose = purpose.as_str(),
            bytes = bytes.len(),
            user_id = actor.id.0,
            "media stored"
        );

        Ok(StoredMediaDto {
            reference: reference.into_inner(),
            purpose: purpose.as_str().to_string(),
            bytes: bytes.len() as u64,
            width: info.map(|info| info.width),
            height: info.map(|info| info.height),
        })
    }

    fn decode_payload(&self, data: &str) -> ApplicationResult<Vec<u8>> {
        // Four base64 characters per three bytes; reject before allocating.
        if data.len() / 4 * 3 > self.max_upload_bytes + 3 {
            return Err(self.too_large());
        }
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|err| ApplicationError::validation(format!("invalid base64 payload: {err}")))?;
        if bytes.is_empty() {
            return Err(ApplicationError::validation("uploaded file is empty"));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(self.too_large());
        }
        Ok(bytes)
    }

    fn too_large(&self) -> ApplicationError {
        ApplicationError::validation(format!(
            "uploaded file exceeds {} bytes",
            self.max_upload_bytes
        ))
    }

    async fn inspect(&self, bytes: Vec<u8>) -> ApplicationResult<ImageInfo> {
        let codec = Arc::clone(&self.codec);
        tokio::task::spawn_blocking(move || codec.inspect(&bytes))
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("image task failed: {err}")))?
    }
}

/// Keeps a short alphanumeric extension from the client's file name.
fn attachment_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_CHARS
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map_or_else(|| "bin".to_string(), str::to_ascii_lowercase)
}
