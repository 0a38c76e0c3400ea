// src/presentation/http/controllers/pages.rs
use crate::application::{
    commands::pages::{CreatePageCommand, UpdatePageCommand},
    dto::PageDto,
    queries::pages::GetPageBySlugQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePageRequest {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Empty string regenerates the slug from the title.
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/pages",
    responses((status = 200, description = "Published pages; page managers also get drafts.", body = [PageDto])),
    tag = "Pages"
)]
pub async fn list_pages(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
) -> HttpResult<Json<Vec<PageDto>>> {
    state
        .services
        .page_queries
        .list_pages(actor.0.as_ref())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/pages/by-slug/{slug}",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Published page.", body = PageDto),
        (status = 404, description = "No published page with that slug.", body = ErrorResponse)
    ),
    security(()),
    tag = "Pages"
)]
pub async fn get_page_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PageDto>> {
    state
        .services
        .page_queries
        .get_page_by_slug(GetPageBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/pages",
    request_body = CreatePageRequest,
    responses(
        (status = 201, description = "Page created with a unique slug.", body = PageDto),
        (status = 403, description = "Requires pages:manage.", body = ErrorResponse)
    ),
    tag = "Pages"
)]
pub async fn create_page(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePageRequest>,
) -> HttpResult<(StatusCode, Json<PageDto>)> {
    let command = CreatePageCommand {
        title: payload.title,
        content: payload.content,
        slug: payload.slug,
        is_published: payload.is_published,
    };

    let page = state
        .services
        .page_commands
        .create_page(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(page)))
}

#[utoipa::path(
    put,
    path = "/api/v1/pages/{id}",
    params(("id" = i64, Path, description = "Page id")),
    request_body = UpdatePageRequest,
    responses(
        (status = 200, description = "Updated page.", body = PageDto),
        (status = 404, description = "Unknown page.", body = ErrorResponse),
        (status = 409, description = "Slug already used by another page.", body = ErrorResponse)
    ),
    tag = "Pages"
)]
pub async fn update_page(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePageRequest>,
) -> HttpResult<Json<PageDto>> {
    let command = UpdatePageCommand {
        id,
        title: payload.title,
        content: payload.content,
        slug: payload.slug,
        is_published: payload.is_published,
    };

    state
        .services
        .page_commands
        .update_page(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/pages/{id}",
    params(("id" = i64, Path, description = "Page id")),
    responses(
        (status = 200, description = "Page deleted.", body = StatusResponse),
        (status = 404, description = "Unknown page.", body = ErrorResponse)
    ),
    tag = "Pages"
)]
pub async fn delete_page(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .page_commands
        .delete_page(&user, id)
        .await
        .into_http()?;

    Ok(Json(StatusResponse::new("deleted")))
}
