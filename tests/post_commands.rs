// tests/post_commands.rs
use std::sync::Arc;

use image::ImageFormat;

use blog_core::application::commands::posts::{
    CategoryChoice, CreatePostCommand, DeletePostCommand, UpdatePostCommand,
};
use blog_core::application::dto::AuthenticatedUser;
use blog_core::application::error::ApplicationError;
use blog_core::application::queries::posts::GetPostBySlugQuery;

mod support;

use support::{ScriptedSuffixes, TestApp, encoded_image, image_size, test_app, test_app_with_suffixes};

fn create(title: &str) -> CreatePostCommand {
    CreatePostCommand {
        title: title.to_string(),
        excerpt: "A short summary".to_string(),
        content: "Body text".to_string(),
        slug: None,
        cover: None,
        cover_in_post_content: true,
        is_published: true,
        category: CategoryChoice {
            existing_id: None,
            new_name: Some("General".to_string()),
        },
        tags: None,
    }
}

/// Writes an image straight into the media root, as an earlier upload would.
fn place_image(app: &TestApp, reference: &str, width: u32, height: u32, format: ImageFormat) {
    let path = app.media_path(reference);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, encoded_image(width, height, format)).unwrap();
}

async fn admin_and_author(app: &TestApp) -> (AuthenticatedUser, AuthenticatedUser) {
    let admin = app.user("admin").await;
    let author = app.user("writer").await;
    (admin, author)
}

#[tokio::test]
async fn slug_is_derived_from_title_and_disambiguated() {
    let app = test_app_with_suffixes(Arc::new(ScriptedSuffixes::new(&["x7k2"]))).await;
    let (_, author) = admin_and_author(&app).await;
    let posts = &app.services.post_commands;

    let first = posts.create_post(&author, create("Hello World!")).await.unwrap();
    assert_eq!(first.slug, "hello-world");
    assert_eq!(first.url, "/post/hello-world");

    let second = posts.create_post(&author, create("Hello, World")).await.unwrap();
    assert_eq!(second.slug, "hello-world-x7k2");
}

#[tokio::test]
async fn taken_suffix_is_retried() {
    let app = test_app_with_suffixes(Arc::new(ScriptedSuffixes::new(&["aaaa", "aaaa", "bbbb"])))
        .await;
    let (_, author) = admin_and_author(&app).await;
    let posts = &app.services.post_commands;

    posts.create_post(&author, create("Clash")).await.unwrap();
    let second = posts.create_post(&author, create("Clash")).await.unwrap();
    let third = posts.create_post(&author, create("Clash")).await.unwrap();
    assert_eq!(second.slug, "clash-aaaa");
    assert_eq!(third.slug, "clash-bbbb");
}

#[tokio::test]
async fn title_without_slug_characters_gets_bare_suffix() {
    let app = test_app_with_suffixes(Arc::new(ScriptedSuffixes::new(&["q9z1"]))).await;
    let (_, author) = admin_and_author(&app).await;

    let post = app
        .services
        .post_commands
        .create_post(&author, create("!!!"))
        .await
        .unwrap();
    assert_eq!(post.slug, "q9z1");
}

#[tokio::test]
async fn resaving_keeps_the_slug_and_empty_slug_regenerates_it() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;
    let posts = &app.services.post_commands;
    let post = posts.create_post(&author, create("Original title")).await.unwrap();

    let renamed = posts
        .update_post(
            &author,
            UpdatePostCommand {
                id: post.id,
                title: Some("Renamed title".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Renamed title");
    assert_eq!(renamed.slug, "original-title");

    let regenerated = posts
        .update_post(
            &author,
            UpdatePostCommand {
                id: post.id,
                slug: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(regenerated.slug, "renamed-title");
}

#[tokio::test]
async fn explicit_duplicate_slug_is_a_conflict() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;
    let posts = &app.services.post_commands;
    posts.create_post(&author, create("First")).await.unwrap();

    let mut command = create("Second");
    command.slug = Some("first".to_string());
    let err = posts.create_post(&author, command).await.unwrap_err();
    assert!(err.is_conflict(), "got {err:?}");
}

#[tokio::test]
async fn wide_cover_is_downscaled_after_create() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;
    let reference = "posts/2024/05/wide.jpg";
    place_image(&app, reference, 1600, 1200, ImageFormat::Jpeg);

    let mut command = create("With cover");
    command.cover = Some(reference.to_string());
    let post = app
        .services
        .post_commands
        .create_post(&author, command)
        .await
        .unwrap();

    assert_eq!(post.cover.as_deref(), Some(reference));
    let stored = std::fs::read(app.media_path(reference)).unwrap();
    assert_eq!(image_size(&stored), (800, 600));
}

#[tokio::test]
async fn narrow_cover_is_left_untouched() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;
    let reference = "posts/2024/05/narrow.png";
    place_image(&app, reference, 400, 300, ImageFormat::Png);
    let original = std::fs::read(app.media_path(reference)).unwrap();

    let mut command = create("Small cover");
    command.cover = Some(reference.to_string());
    app.services
        .post_commands
        .create_post(&author, command)
        .await
        .unwrap();

    assert_eq!(std::fs::read(app.media_path(reference)).unwrap(), original);
}

#[tokio::test]
async fn unchanged_cover_is_not_processed_again() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;
    let posts = &app.services.post_commands;
    let reference = "posts/2024/05/kept.png";
    place_image(&app, reference, 500, 500, ImageFormat::Png);

    let mut command = create("Kept cover");
    command.cover = Some(reference.to_string());
    let post = posts.create_post(&author, command).await.unwrap();

    // Swap in a wide file behind the same reference; a save that keeps the
    // reference must not touch it.
    place_image(&app, reference, 1200, 600, ImageFormat::Png);
    posts
        .update_post(
            &author,
            UpdatePostCommand {
                id: post.id,
                cover: Some(reference.to_string()),
                excerpt: Some("Edited".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let stored = std::fs::read(app.media_path(reference)).unwrap();
    assert_eq!(image_size(&stored), (1200, 600));

    let replacement = "posts/2024/05/new.png";
    place_image(&app, replacement, 1200, 600, ImageFormat::Png);
    posts
        .update_post(
            &author,
            UpdatePostCommand {
                id: post.id,
                cover: Some(replacement.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let stored = std::fs::read(app.media_path(replacement)).unwrap();
    assert_eq!(image_size(&stored), (800, 400));
}

#[tokio::test]
async fn missing_cover_file_does_not_fail_the_save() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;

    let mut command = create("Ghost cover");
    command.cover = Some("posts/2024/05/missing.jpg".to_string());
    let post = app
        .services
        .post_commands
        .create_post(&author, command)
        .await
        .unwrap();
    assert_eq!(post.cover.as_deref(), Some("posts/2024/05/missing.jpg"));
}

#[tokio::test]
async fn authors_edit_only_their_own_posts() {
    let app = test_app().await;
    let (admin, author) = admin_and_author(&app).await;
    let other = app.user("other").await;
    let posts = &app.services.post_commands;
    let post = posts.create_post(&author, create("Mine")).await.unwrap();

    let edit = |title: &str| UpdatePostCommand {
        id: post.id,
        title: Some(title.to_string()),
        ..Default::default()
    };

    let err = posts.update_post(&other, edit("Stolen")).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
    let err = posts
        .delete_post(&other, DeletePostCommand { id: post.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let edited = posts.update_post(&admin, edit("Moderated")).await.unwrap();
    assert_eq!(edited.title, "Moderated");
    assert_eq!(
        edited.updated_by.as_ref().map(|a| a.username.as_str()),
        Some("admin")
    );

    posts
        .delete_post(&author, DeletePostCommand { id: post.id })
        .await
        .unwrap();
    let err = app
        .services
        .post_queries
        .get_post_by_slug(None, GetPostBySlugQuery { slug: "mine".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn tags_and_new_category_are_created_once() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;
    let posts = &app.services.post_commands;

    let mut command = create("Tagged");
    command.tags = Some("Rust, Web , rust,,Web".to_string());
    command.category.new_name = Some("Programming".to_string());
    let first = posts.create_post(&author, command).await.unwrap();
    let names: Vec<_> = first.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), 3, "tags: {names:?}");

    let mut command = create("Tagged again");
    command.tags = Some("Web".to_string());
    command.category.new_name = Some("Programming".to_string());
    let second = posts.create_post(&author, command).await.unwrap();

    assert_eq!(
        second.category.as_ref().map(|c| c.id),
        first.category.as_ref().map(|c| c.id)
    );
    let tags = app.services.taxonomy_queries.list_tags().await.unwrap();
    assert_eq!(tags.len(), 3);
}

#[tokio::test]
async fn unknown_category_id_is_not_found() {
    let app = test_app().await;
    let (_, author) = admin_and_author(&app).await;

    let mut command = create("Lost");
    command.category = CategoryChoice {
        existing_id: Some(42),
        new_name: None,
    };
    let err = app
        .services
        .post_commands
        .create_post(&author, command)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn drafts_are_visible_only_to_their_author() {
    let app = test_app().await;
    let (admin, author) = admin_and_author(&app).await;

    let mut command = create("Work in progress");
    command.is_published = false;
    let draft = app
        .services
        .post_commands
        .create_post(&author, command)
        .await
        .unwrap();
    assert_eq!(draft.url, "/");

    let queries = &app.services.post_queries;
    let query = || GetPostBySlugQuery {
        slug: draft.slug.clone(),
    };
    assert!(queries.get_post_by_slug(Some(&author), query()).await.is_ok());
    assert!(queries.get_post_by_slug(None, query()).await.is_err());
    assert!(queries.get_post_by_slug(Some(&admin), query()).await.is_err());
}
