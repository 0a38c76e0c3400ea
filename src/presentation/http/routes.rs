// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{auth, media, pages, posts, site, taxonomy},
    middleware::require_capability,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request},
    middleware::{self, Next},
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Room for base64 overhead on top of the configured upload limit.
fn upload_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_mul(4) / 3 + 64 * 1024
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, allowed_origins: &[String], max_upload_bytes: usize) -> Router {
    let media_routes = Router::new()
        .route("/api/v1/media", post(media::upload_media))
        .route_layer(middleware::from_fn(|req: Request<Body>, next: Next| {
            require_capability(req, next, "media", "upload")
        }))
        .layer(DefaultBodyLimit::max(upload_body_limit(max_upload_bytes)));

    Router::new()
        .merge(openapi::docs_router())
        .merge(media_routes)
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile))
        .route("/api/v1/site", get(site::get_site).put(site::save_site))
        .route("/api/v1/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/v1/posts/latest", get(posts::latest_posts))
        .route("/api/v1/posts/drafts", get(posts::list_drafts))
        .route("/api/v1/posts/by-slug/{slug}", get(posts::get_post_by_slug))
        .route(
            "/api/v1/posts/{id}",
            put(posts::update_post).delete(posts::delete_post),
        )
        .route(
            "/api/v1/categories",
            get(taxonomy::list_categories).post(taxonomy::create_category),
        )
        .route("/api/v1/categories/{slug}/posts", get(posts::list_by_category))
        .route(
            "/api/v1/tags",
            get(taxonomy::list_tags).post(taxonomy::create_tag),
        )
        .route("/api/v1/tags/{slug}/posts", get(posts::list_by_tag))
        .route("/api/v1/authors/{id}/posts", get(posts::list_by_author))
        .route("/api/v1/pages", get(pages::list_pages).post(pages::create_page))
        .route("/api/v1/pages/by-slug/{slug}", get(pages::get_page_by_slug))
        .route(
            "/api/v1/pages/{id}",
            put(pages::update_page).delete(pages::delete_page),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse::new("ok"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_limit_leaves_room_for_base64() {
        assert!(upload_body_limit(3 * 1024 * 1024) > 4 * 1024 * 1024);
    }
}
