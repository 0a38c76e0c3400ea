// tests/e2e_http.rs
use axum::http::{Method, StatusCode};
use image::ImageFormat;
use serde_json::{Value, json};

mod support;

use support::{
    assert_error, base64_image, image_size, json_request, register_and_login, send, test_app,
};

fn post_body(title: &str, published: bool) -> Value {
    json!({
        "title": title,
        "excerpt": "Summary",
        "content": "Body",
        "is_published": published,
        "new_category": "General",
    })
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = test_app().await.router();

    let (status, body) = send(&app, json_request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(
        &app,
        json_request(Method::GET, "/api-docs/openapi.json", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/posts"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearerAuth"].is_object());
}

#[tokio::test]
async fn register_login_and_profile() {
    let app = test_app().await.router();
    let token = register_and_login(&app, "alice").await;

    let (status, me) = send(
        &app,
        json_request(Method::GET, "/api/v1/auth/me", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["username"], "alice");
    assert_eq!(me["user"]["role"], "admin");
    assert!(me["capabilities"].as_array().unwrap().len() >= 6);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "wrong-password" })),
        ),
    )
    .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let app = test_app().await.router();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/posts", None, Some(post_body("Nope", true))),
    )
    .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/posts", Some("not-a-token"), None),
    )
    .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/media",
            None,
            Some(json!({ "purpose": "cover", "file_name": "a.png", "data_base64": "AAAA" })),
        ),
    )
    .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn site_setup_is_admin_only() {
    let app = test_app().await.router();
    let admin = register_and_login(&app, "admin").await;
    let author = register_and_login(&app, "author").await;

    let (status, body) = send(&app, json_request(Method::GET, "/api/v1/site", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let setup = json!({
        "title": "My Blog",
        "description": "Notes",
        "show_footer": false,
        "menu_links": [
            { "text": "Home", "url_or_path": "/" },
            { "text": "Docs", "url_or_path": "https://docs.example.com", "new_tab": true }
        ]
    });

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/v1/site", Some(&author), Some(setup.clone())),
    )
    .await;
    assert_error(status, &body, StatusCode::FORBIDDEN);

    let (status, saved) = send(
        &app,
        json_request(Method::PUT, "/api/v1/site", Some(&admin), Some(setup)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["title"], "My Blog");
    assert_eq!(saved["show_footer"], false);
    assert_eq!(saved["show_header"], true);

    let (_, fetched) = send(&app, json_request(Method::GET, "/api/v1/site", None, None)).await;
    assert_eq!(fetched["menu_links"][1]["text"], "Docs");
    assert_eq!(fetched["menu_links"][1]["new_tab"], true);
}

#[tokio::test]
async fn post_lifecycle_over_http() {
    let app = test_app().await.router();
    let token = register_and_login(&app, "alice").await;

    let (status, created) = send(
        &app,
        json_request(Method::POST, "/api/v1/posts", Some(&token), Some(post_body("Hello World!", true))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "hello-world");
    assert_eq!(created["category"]["slug"], "general");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(
        &app,
        json_request(Method::GET, "/api/v1/posts/by-slug/hello-world", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);

    let (status, second) = send(
        &app,
        json_request(Method::POST, "/api/v1/posts", Some(&token), Some(post_body("Hello World", true))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let slug = second["slug"].as_str().unwrap();
    assert!(slug.starts_with("hello-world-") && slug.len() == "hello-world-".len() + 4);

    let (status, updated) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/v1/posts/{id}"),
            Some(&token),
            Some(json!({ "title": "Changed" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "hello-world");

    let (status, deleted) = send(
        &app,
        json_request(Method::DELETE, &format!("/api/v1/posts/{id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["status"], "deleted");

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/posts/by-slug/hello-world", None, None),
    )
    .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn uploaded_cover_is_resized_when_post_is_saved() {
    let harness = test_app().await;
    let app = harness.router();
    let token = register_and_login(&app, "alice").await;

    let (status, media) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/media",
            Some(&token),
            Some(json!({
                "purpose": "cover",
                "file_name": "holiday.jpeg",
                "data_base64": base64_image(1200, 900, ImageFormat::Jpeg),
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(media["width"], 1200);
    let reference = media["reference"].as_str().unwrap().to_string();
    assert!(reference.starts_with("posts/") && reference.ends_with(".jpg"));

    // Uploading alone never resizes.
    let stored = std::fs::read(harness.media_path(&reference)).unwrap();
    assert_eq!(image_size(&stored), (1200, 900));

    let mut body = post_body("Holiday", true);
    body["cover"] = json!(reference);
    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/v1/posts", Some(&token), Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = std::fs::read(harness.media_path(&reference)).unwrap();
    assert_eq!(image_size(&stored), (800, 600));
}

#[tokio::test]
async fn favicon_must_be_png_and_payload_must_decode() {
    let app = test_app().await.router();
    let token = register_and_login(&app, "alice").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/media",
            Some(&token),
            Some(json!({
                "purpose": "favicon",
                "file_name": "icon.jpg",
                "data_base64": base64_image(64, 64, ImageFormat::Jpeg),
            })),
        ),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/media",
            Some(&token),
            Some(json!({ "purpose": "cover", "file_name": "x.png", "data_base64": "%%%" })),
        ),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, stored) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/media",
            Some(&token),
            Some(json!({
                "purpose": "favicon",
                "file_name": "icon.png",
                "data_base64": base64_image(64, 64, ImageFormat::Png),
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(stored["reference"].as_str().unwrap().starts_with("assets/favicon/"));
}

#[tokio::test]
async fn category_listing_carries_titles_and_hides_drafts() {
    let app = test_app().await.router();
    let token = register_and_login(&app, "alice").await;

    send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/site",
            Some(&token),
            Some(json!({ "title": "My Blog", "menu_links": [] })),
        ),
    )
    .await;

    for (title, published) in [("Visible", true), ("Hidden draft", false)] {
        let (status, _) = send(
            &app,
            json_request(Method::POST, "/api/v1/posts", Some(&token), Some(post_body(title, published))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, listing) = send(
        &app,
        json_request(Method::GET, "/api/v1/categories/general/posts", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["page_title"], "Category: General - My Blog");
    assert_eq!(listing["heading"], "Category: \"General\"");
    assert_eq!(listing["posts"]["total"], 1);
    assert_eq!(listing["posts"]["items"][0]["slug"], "visible");
    assert_eq!(listing["site"]["title"], "My Blog");

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/posts/by-slug/hidden-draft", None, None),
    )
    .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (status, drafts) = send(
        &app,
        json_request(Method::GET, "/api/v1/posts/drafts", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(drafts["posts"]["items"][0]["slug"], "hidden-draft");

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/categories/nope/posts", None, None),
    )
    .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_uses_the_query_parameter() {
    let app = test_app().await.router();
    let token = register_and_login(&app, "alice").await;
    for title in ["Async Rust", "Gardening tips"] {
        send(
            &app,
            json_request(Method::POST, "/api/v1/posts", Some(&token), Some(post_body(title, true))),
        )
        .await;
    }

    let (status, listing) = send(
        &app,
        json_request(Method::GET, "/api/v1/posts?q=RUST&per_page=5", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["posts"]["total"], 1);
    assert_eq!(listing["posts"]["per_page"], 5);
    assert_eq!(listing["posts"]["items"][0]["slug"], "async-rust");
}

#[tokio::test]
async fn pages_are_managed_by_admins() {
    let app = test_app().await.router();
    let admin = register_and_login(&app, "admin").await;
    let author = register_and_login(&app, "author").await;
    let page = json!({ "title": "About us", "content": "Who we are", "is_published": true });

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/pages", Some(&author), Some(page.clone())),
    )
    .await;
    assert_error(status, &body, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &app,
        json_request(Method::POST, "/api/v1/pages", Some(&admin), Some(page)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "about-us");

    let (status, fetched) = send(
        &app,
        json_request(Method::GET, "/api/v1/pages/by-slug/about-us", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "About us");
}
