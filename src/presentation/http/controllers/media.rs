// src/presentation/http/controllers/media.rs
use crate::application::{commands::media::UploadMediaCommand, dto::StoredMediaDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadMediaRequest {
    /// `cover`, `favicon` or `attachment`.
    pub purpose: String,
    pub file_name: String,
    /// Standard base64 of the file contents.
    pub data_base64: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/media",
    request_body = UploadMediaRequest,
    responses(
        (status = 201, description = "File stored.", body = StoredMediaDto),
        (status = 400, description = "Not an image, wrong format or too large.", body = ErrorResponse),
        (status = 403, description = "Requires media:upload.", body = ErrorResponse)
    ),
    tag = "Media"
)]
pub async fn upload_media(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<UploadMediaRequest>,
) -> HttpResult<(StatusCode, Json<StoredMediaDto>)> {
    let command = UploadMediaCommand {
        purpose: payload.purpose,
        file_name: payload.file_name,
        data_base64: payload.data_base64,
    };

    let stored = state
        .services
        .media_commands
        .upload(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(stored)))
}
