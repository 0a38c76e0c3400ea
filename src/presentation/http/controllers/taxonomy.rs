// src/presentation/http/controllers/taxonomy.rs
use crate::application::{
    commands::taxonomy::{CreateCategoryCommand, CreateTagCommand},
    dto::{CategoryDto, TagDto},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTermRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "All categories by name.", body = [CategoryDto])),
    security(()),
    tag = "Taxonomy"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    state
        .services
        .taxonomy_queries
        .list_categories()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateTermRequest,
    responses(
        (status = 201, description = "Category created.", body = CategoryDto),
        (status = 403, description = "Requires pages:manage.", body = ErrorResponse),
        (status = 409, description = "A category with that name exists.", body = ErrorResponse)
    ),
    tag = "Taxonomy"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateTermRequest>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let category = state
        .services
        .taxonomy_commands
        .create_category(&user, CreateCategoryCommand { name: payload.name })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses((status = 200, description = "All tags by name.", body = [TagDto])),
    security(()),
    tag = "Taxonomy"
)]
pub async fn list_tags(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<TagDto>>> {
    state
        .services
        .taxonomy_queries
        .list_tags()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTermRequest,
    responses(
        (status = 201, description = "Tag created.", body = TagDto),
        (status = 403, description = "Requires pages:manage.", body = ErrorResponse),
        (status = 409, description = "A tag with that name exists.", body = ErrorResponse)
    ),
    tag = "Taxonomy"
)]
pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateTermRequest>,
) -> HttpResult<(StatusCode, Json<TagDto>)> {
    let tag = state
        .services
        .taxonomy_commands
        .create_tag(&user, CreateTagCommand { name: payload.name })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(tag)))
}
