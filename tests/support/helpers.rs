// tests/support/helpers.rs
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt as _;

use blog_core::application::dto::AuthenticatedUser;
use blog_core::application::ports::media::EncodeOptions;
use blog_core::application::ports::util::SuffixGenerator;
use blog_core::application::services::{
    ApplicationDependencies, ApplicationServices, ImageSettings,
};
use blog_core::domain::media::TargetWidth;
use blog_core::infrastructure::{
    database,
    media::{ImageRsCodec, LocalMediaStorage},
    repositories::{
        SqliteCategoryRepository, SqlitePageRepository, SqlitePostRepository,
        SqliteSiteSetupRepository, SqliteSlugIndex, SqliteTagRepository, SqliteUserRepository,
    },
    security::token::BiscuitTokenManager,
    util::{RandomSuffixGenerator, WordSlugGenerator},
};
use blog_core::presentation::http::{routes::build_router, state::HttpState};

use super::builders::actor;
use super::mocks::{FixedClock, PlainPasswordHasher};

pub const TEST_KEY: &str = "4f6b3c1d2e8a9b7c6d5e4f3a2b1c0d9e8f7a6b5c4d3e2f1a0b9c8d7e6f5a4b3c";
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// A fully wired application over an in-memory database and a temporary
/// media root. Dropping it removes the media directory.
pub struct TestApp {
    pub pool: SqlitePool,
    pub services: Arc<ApplicationServices>,
    pub media: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(
            HttpState::new(Arc::clone(&self.services)),
            &["*".to_string()],
            MAX_UPLOAD_BYTES,
        )
    }

    pub fn media_path(&self, reference: &str) -> std::path::PathBuf {
        self.media.path().join(reference)
    }

    /// Registers a user through the application and returns it as an actor.
    pub async fn user(&self, username: &str) -> AuthenticatedUser {
        let created = self
            .services
            .user_commands
            .register(blog_core::application::commands::users::RegisterUserCommand {
                username: username.to_string(),
                password: "password123".to_string(),
                display_name: None,
            })
            .await
            .unwrap();
        actor(created.id, &created.username, created.role)
    }
}

pub async fn memory_pool() -> SqlitePool {
    let pool = database::init_memory_pool().await.expect("memory pool");
    database::run_migrations(&pool).await.expect("migrations");
    pool
}

pub async fn test_app() -> TestApp {
    test_app_with_suffixes(Arc::new(RandomSuffixGenerator)).await
}

pub async fn test_app_with_suffixes(suffixes: Arc<dyn SuffixGenerator>) -> TestApp {
    let pool = memory_pool().await;
    let media = tempfile::tempdir().expect("media dir");
    let slug_index = Arc::new(SqliteSlugIndex::new(pool.clone()));

    let deps = ApplicationDependencies {
        user_repo: Arc::new(SqliteUserRepository::new(pool.clone())),
        post_repo: Arc::new(SqlitePostRepository::new(pool.clone())),
        page_repo: Arc::new(SqlitePageRepository::new(pool.clone())),
        category_repo: Arc::new(SqliteCategoryRepository::new(pool.clone())),
        tag_repo: Arc::new(SqliteTagRepository::new(pool.clone())),
        site_repo: Arc::new(SqliteSiteSetupRepository::new(pool.clone())),
        post_slugs: slug_index.clone(),
        page_slugs: slug_index.clone(),
        category_slugs: slug_index.clone(),
        tag_slugs: slug_index,
        password_hasher: Arc::new(PlainPasswordHasher),
        token_manager: Arc::new(
            BiscuitTokenManager::new(TEST_KEY, Duration::from_secs(600)).expect("token manager"),
        ),
        clock: Arc::new(FixedClock),
        slugger: Arc::new(WordSlugGenerator),
        suffixes,
        media_storage: Arc::new(LocalMediaStorage::new(media.path())),
        image_codec: Arc::new(ImageRsCodec),
        images: ImageSettings {
            post_cover_width: TargetWidth::new(800).unwrap(),
            favicon_width: TargetWidth::new(32).unwrap(),
            encode: EncodeOptions::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        },
    };

    TestApp {
        pool,
        services: Arc::new(ApplicationServices::new(deps)),
        media,
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request and returns the status with the decoded JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let (parts, body_stream) = resp.into_parts();
    let bytes = body::to_bytes(body_stream, 8 * 1024 * 1024).await.unwrap();
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        ct.starts_with("application/json"),
        "unexpected content-type {ct:?} for status {status}"
    );
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!("invalid json ({err}): {}", String::from_utf8_lossy(&bytes))
    });
    (status, json)
}

/// Registers `username` over HTTP and logs in, returning the bearer token.
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let credentials = serde_json::json!({ "username": username, "password": "password123" });
    let (status, _) = send(
        app,
        json_request(Method::POST, "/api/v1/auth/register", None, Some(credentials.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        json_request(Method::POST, "/api/v1/auth/login", None, Some(credentials)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"]["token"].as_str().unwrap().to_string()
}

/// Asserts an error response with the expected status and reason phrase.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected, "unexpected body: {body}");
    assert_eq!(
        body["error"].as_str().unwrap_or(""),
        expected.canonical_reason().unwrap()
    );
    assert!(!body["message"].as_str().unwrap_or("").is_empty());
}
