// src/presentation/http/openapi.rs
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::site::get_site,
        crate::presentation::http::controllers::site::save_site,
        crate::presentation::http::controllers::posts::list_posts,
        crate::presentation::http::controllers::posts::latest_posts,
        crate::presentation::http::controllers::posts::list_drafts,
        crate::presentation::http::controllers::posts::list_by_category,
        crate::presentation::http::controllers::posts::list_by_tag,
        crate::presentation::http::controllers::posts::list_by_author,
        crate::presentation::http::controllers::posts::get_post_by_slug,
        crate::presentation::http::controllers::posts::create_post,
        crate::presentation::http::controllers::posts::update_post,
        crate::presentation::http::controllers::posts::delete_post,
        crate::presentation::http::controllers::taxonomy::list_categories,
        crate::presentation::http::controllers::taxonomy::create_category,
        crate::presentation::http::controllers::taxonomy::list_tags,
        crate::presentation::http::controllers::taxonomy::create_tag,
        crate::presentation::http::controllers::pages::list_pages,
        crate::presentation::http::controllers::pages::get_page_by_slug,
        crate::presentation::http::controllers::pages::create_page,
        crate::presentation::http::controllers::pages::update_page,
        crate::presentation::http::controllers::pages::delete_page,
        crate::presentation::http::controllers::media::upload_media
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::site::SaveSiteRequest,
            crate::presentation::http::controllers::site::MenuLinkRequest,
            crate::presentation::http::controllers::posts::CreatePostRequest,
            crate::presentation::http::controllers::posts::UpdatePostRequest,
            crate::presentation::http::controllers::taxonomy::CreateTermRequest,
            crate::presentation::http::controllers::pages::CreatePageRequest,
            crate::presentation::http::controllers::pages::UpdatePageRequest,
            crate::presentation::http::controllers::media::UploadMediaRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::AuthorDto,
            crate::application::dto::PostDto,
            crate::application::dto::PostListingDto,
            crate::application::dto::PageDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::TagDto,
            crate::application::dto::SiteSetupDto,
            crate::application::dto::MenuLinkDto,
            crate::application::dto::StoredMediaDto
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current user"),
        (name = "Site", description = "Site-wide setup"),
        (name = "Posts", description = "Blog posts and their listings"),
        (name = "Taxonomy", description = "Categories and tags"),
        (name = "Pages", description = "Standalone pages"),
        (name = "Media", description = "Uploads for covers, favicons and attachments"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Blog Core API",
        description = "Blog CMS backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(serve_openapi))
}
