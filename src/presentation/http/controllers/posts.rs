// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::posts::{CategoryChoice, CreatePostCommand, DeletePostCommand, UpdatePostCommand},
    dto::{PostDto, PostListingDto},
    queries::posts::{GetPostBySlugQuery, PostListing},
};
use crate::domain::pagination::PageRequest;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated, SiteContext};
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// One-based page number.
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Search text; only honoured by the main post listing.
    pub q: Option<String>,
}

impl ListingParams {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(PageRequest::DEFAULT_PER_PAGE),
        )
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: Option<String>,
    /// Media reference returned by the upload endpoint.
    pub cover: Option<String>,
    #[serde(default)]
    pub cover_in_post_content: bool,
    #[serde(default)]
    pub is_published: bool,
    pub category_id: Option<i64>,
    /// Wins over `category_id`; created when it does not exist yet.
    pub new_category: Option<String>,
    /// Comma separated tag names.
    pub tags: Option<String>,
}

/// Every field is optional. An empty `slug` regenerates it from the title and
/// an empty `cover` removes the cover.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub cover: Option<String>,
    pub cover_in_post_content: Option<bool>,
    pub is_published: Option<bool>,
    pub category_id: Option<i64>,
    pub new_category: Option<String>,
    pub tags: Option<String>,
}

fn category_choice(existing_id: Option<i64>, new_name: Option<String>) -> Option<CategoryChoice> {
    if existing_id.is_none() && new_name.is_none() {
        return None;
    }
    Some(CategoryChoice {
        existing_id,
        new_name,
    })
}

async fn listing(
    state: &HttpState,
    actor: MaybeAuthenticated,
    site: SiteContext,
    listing: PostListing,
    params: &ListingParams,
) -> HttpResult<Json<PostListingDto>> {
    state
        .services
        .post_queries
        .list_posts(actor.0.as_ref(), site.0, listing, params.page_request())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(ListingParams),
    responses(
        (status = 200, description = "Published posts, newest first, or search results when `q` is set.", body = PostListingDto)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    site: SiteContext,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<PostListingDto>> {
    let selected = match params.q.clone() {
        Some(query) => PostListing::Search { query },
        None => PostListing::Published,
    };
    listing(&state, actor, site, selected, &params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/latest",
    responses(
        (status = 200, description = "The five most recent published posts.", body = [PostDto])
    ),
    security(()),
    tag = "Posts"
)]
pub async fn latest_posts(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<PostDto>>> {
    state
        .services
        .post_queries
        .latest_posts()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/drafts",
    params(ListingParams),
    responses(
        (status = 200, description = "Unpublished posts created by the caller.", body = PostListingDto),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_drafts(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    site: SiteContext,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<PostListingDto>> {
    let actor = MaybeAuthenticated(Some(user));
    listing(&state, actor, site, PostListing::Drafts, &params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{slug}/posts",
    params(("slug" = String, Path, description = "Category slug"), ListingParams),
    responses(
        (status = 200, description = "Published posts in the category.", body = PostListingDto),
        (status = 404, description = "Unknown category.", body = ErrorResponse)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn list_by_category(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    site: SiteContext,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<PostListingDto>> {
    listing(&state, actor, site, PostListing::Category { slug }, &params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{slug}/posts",
    params(("slug" = String, Path, description = "Tag slug"), ListingParams),
    responses(
        (status = 200, description = "Published posts with the tag.", body = PostListingDto),
        (status = 404, description = "Unknown tag.", body = ErrorResponse)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn list_by_tag(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    site: SiteContext,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<PostListingDto>> {
    listing(&state, actor, site, PostListing::Tag { slug }, &params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}/posts",
    params(("id" = i64, Path, description = "Author user id"), ListingParams),
    responses(
        (status = 200, description = "Published posts by the author.", body = PostListingDto),
        (status = 404, description = "Unknown author.", body = ErrorResponse)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn list_by_author(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    site: SiteContext,
    Path(id): Path<i64>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<PostListingDto>> {
    listing(&state, actor, site, PostListing::Author { id }, &params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/by-slug/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post. Drafts are only visible to their author.", body = PostDto),
        (status = 404, description = "No visible post with that slug.", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_slug(actor.0.as_ref(), GetPostBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created with a unique slug.", body = PostDto),
        (status = 400, description = "Invalid field or missing category.", body = ErrorResponse),
        (status = 403, description = "Requires posts:create.", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn create_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<(StatusCode, Json<PostDto>)> {
    let command = CreatePostCommand {
        title: payload.title,
        excerpt: payload.excerpt,
        content: payload.content,
        slug: payload.slug,
        cover: payload.cover,
        cover_in_post_content: payload.cover_in_post_content,
        is_published: payload.is_published,
        category: CategoryChoice {
            existing_id: payload.category_id,
            new_name: payload.new_category,
        },
        tags: payload.tags,
    };

    let post = state
        .services
        .post_commands
        .create_post(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post.", body = PostDto),
        (status = 403, description = "Neither the author nor an admin.", body = ErrorResponse),
        (status = 404, description = "Unknown post.", body = ErrorResponse),
        (status = 409, description = "Slug already used by another post.", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn update_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    let command = UpdatePostCommand {
        id,
        title: payload.title,
        excerpt: payload.excerpt,
        content: payload.content,
        slug: payload.slug,
        cover: payload.cover,
        cover_in_post_content: payload.cover_in_post_content,
        is_published: payload.is_published,
        category: category_choice(payload.category_id, payload.new_category),
        tags: payload.tags,
    };

    state
        .services
        .post_commands
        .update_post(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted.", body = StatusResponse),
        (status = 403, description = "Neither the author nor an admin.", body = ErrorResponse),
        (status = 404, description = "Unknown post.", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .post_commands
        .delete_post(&user, DeletePostCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse::new("deleted")))
}
