// tests/sqlite_repositories.rs
use blog_core::domain::errors::DomainError;
use blog_core::domain::media::ImageRef;
use blog_core::domain::page::{NewPage, PageContent, PageRepository, PageTitle};
use blog_core::domain::pagination::PageRequest;
use blog_core::domain::post::{
    Excerpt, NewPost, Post, PostContent, PostFilter, PostRepository, PostTitle, PostUpdate,
};
use blog_core::domain::site::{
    LinkTarget, MenuLink, MenuText, SiteDescription, SiteSetup, SiteSetupRepository, SiteTitle,
    SiteVisibility,
};
use blog_core::domain::slug::{Slug, SlugIndex};
use blog_core::domain::taxonomy::{
    Category, CategoryId, CategoryName, CategoryRepository, NewCategory, NewTag, Tag, TagName,
    TagRepository,
};
use blog_core::domain::user::{NewUser, PasswordHash, Role, User, UserRepository, Username};
use blog_core::infrastructure::repositories::{
    SqliteCategoryRepository, SqlitePageRepository, SqlitePostRepository,
    SqliteSiteSetupRepository, SqliteSlugIndex, SqliteTagRepository, SqliteUserRepository,
};
use sqlx::SqlitePool;

mod support;

struct Fixture {
    pool: SqlitePool,
    posts: SqlitePostRepository,
    author: User,
    rust: Category,
    tags: Vec<Tag>,
}

async fn fixture() -> Fixture {
    let pool = support::memory_pool().await;
    let users = SqliteUserRepository::new(pool.clone());
    let author = users
        .insert(NewUser::new(
            Username::new("ana").unwrap(),
            None,
            PasswordHash::new("plain$pw").unwrap(),
            Role::Author,
            support::FixedClock::instant(),
        ))
        .await
        .unwrap();

    let rust = SqliteCategoryRepository::new(pool.clone())
        .insert(NewCategory {
            name: CategoryName::new("Rust").unwrap(),
            slug: Slug::new("rust").unwrap(),
        })
        .await
        .unwrap();

    let tag_repo = SqliteTagRepository::new(pool.clone());
    let mut tags = Vec::new();
    for name in ["async", "web"] {
        tags.push(
            tag_repo
                .insert(NewTag {
                    name: TagName::new(name).unwrap(),
                    slug: Slug::new(name).unwrap(),
                })
                .await
                .unwrap(),
        );
    }

    Fixture {
        posts: SqlitePostRepository::new(pool.clone()),
        pool,
        author,
        rust,
        tags,
    }
}

impl Fixture {
    fn new_post(&self, title: &str, slug: &str, published: bool) -> NewPost {
        NewPost {
            title: PostTitle::new(title).unwrap(),
            slug: Slug::new(slug).unwrap(),
            excerpt: Excerpt::new(format!("About {title}")).unwrap(),
            is_published: published,
            content: PostContent::new(format!("{title} body text")).unwrap(),
            cover: None,
            cover_in_post_content: true,
            category_id: self.rust.id,
            tag_ids: Vec::new(),
            created_by: self.author.id,
            created_at: support::FixedClock::instant(),
        }
    }

    async fn insert(&self, title: &str, slug: &str, published: bool) -> Post {
        self.posts
            .insert(self.new_post(title, slug, published))
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn duplicate_post_slug_is_a_conflict() {
    let fx = fixture().await;
    fx.insert("Hello World", "hello-world", true).await;

    let err = fx
        .posts
        .insert(fx.new_post("Another hello", "hello-world", true))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn updating_into_a_taken_slug_is_a_conflict() {
    let fx = fixture().await;
    fx.insert("First", "first", true).await;
    let second = fx.insert("Second", "second", true).await;

    let update = PostUpdate::new(second.id, fx.author.id, support::FixedClock::instant())
        .with_slug(Slug::new("first").unwrap());
    let err = fx.posts.update(update).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let unchanged = fx.posts.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(unchanged.slug.as_str(), "second");
}

#[tokio::test]
async fn duplicate_page_and_category_slugs_are_conflicts() {
    let fx = fixture().await;

    let pages = SqlitePageRepository::new(fx.pool.clone());
    let page = || NewPage {
        title: PageTitle::new("About").unwrap(),
        slug: Slug::new("about").unwrap(),
        is_published: true,
        content: PageContent::new("Who we are").unwrap(),
        created_at: support::FixedClock::instant(),
        updated_at: support::FixedClock::instant(),
    };
    pages.insert(page()).await.unwrap();
    assert!(matches!(
        pages.insert(page()).await.unwrap_err(),
        DomainError::Conflict(_)
    ));

    let err = SqliteCategoryRepository::new(fx.pool.clone())
        .insert(NewCategory {
            name: CategoryName::new("Rust again").unwrap(),
            slug: Slug::new("rust").unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn unknown_category_reference_is_not_found() {
    let fx = fixture().await;
    let mut post = fx.new_post("Orphan", "orphan", true);
    post.category_id = CategoryId::new(999).unwrap();

    let err = fx.posts.insert(post).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn slug_index_ignores_the_record_being_saved() {
    let fx = fixture().await;
    let post = fx.insert("Hello", "hello", true).await;
    let index = SqliteSlugIndex::new(fx.pool.clone());
    let slug = Slug::new("hello").unwrap();

    assert!(SlugIndex::<Post>::slug_taken(&index, &slug, None).await.unwrap());
    assert!(
        !SlugIndex::<Post>::slug_taken(&index, &slug, Some(post.id.0))
            .await
            .unwrap()
    );
    // Collections are independent.
    assert!(!SlugIndex::<Category>::slug_taken(&index, &slug, None).await.unwrap());
    assert!(
        SlugIndex::<Category>::slug_taken(&index, &Slug::new("rust").unwrap(), None)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn post_round_trips_with_relations() {
    let fx = fixture().await;
    let mut new_post = fx.new_post("Tagged", "tagged", true);
    new_post.tag_ids = fx.tags.iter().map(|tag| tag.id).collect();
    new_post.cover = Some(ImageRef::new("posts/2024/05/cover.jpg").unwrap());

    let post = fx.posts.insert(new_post).await.unwrap();
    assert_eq!(post.category.as_ref().map(|c| c.id), Some(fx.rust.id));
    assert_eq!(post.tags.len(), 2);
    assert_eq!(post.created_by.as_ref().map(|a| a.id), Some(fx.author.id));
    assert_eq!(post.cover.as_ref().map(ImageRef::as_str), Some("posts/2024/05/cover.jpg"));

    let update = PostUpdate::new(post.id, fx.author.id, support::FixedClock::instant())
        .with_tags(vec![fx.tags[1].id])
        .with_cover(None);
    let updated = fx.posts.update(update).await.unwrap();
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].name.as_str(), "web");
    assert!(updated.cover.is_none());
    assert_eq!(updated.slug.as_str(), "tagged");
}

#[tokio::test]
async fn listings_apply_filters_newest_first() {
    let fx = fixture().await;
    let mut tagged = fx.new_post("Async Rust", "async-rust", true);
    tagged.tag_ids = vec![fx.tags[0].id];
    fx.posts.insert(tagged).await.unwrap();
    fx.insert("Web servers", "web-servers", true).await;
    fx.insert("Unfinished thoughts", "unfinished", false).await;

    let page = PageRequest::default();

    let (published, total) = fx.posts.list(&PostFilter::Published, page).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(published[0].slug.as_str(), "web-servers");
    assert_eq!(published[1].slug.as_str(), "async-rust");

    let (by_tag, _) = fx
        .posts
        .list(&PostFilter::Tag(fx.tags[0].id), page)
        .await
        .unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].slug.as_str(), "async-rust");

    let (by_category, total) = fx
        .posts
        .list(&PostFilter::Category(fx.rust.id), page)
        .await
        .unwrap();
    assert_eq!((by_category.len(), total), (2, 2));

    let (drafts, _) = fx
        .posts
        .list(&PostFilter::Drafts(fx.author.id), page)
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].slug.as_str(), "unfinished");

    let (by_author, _) = fx
        .posts
        .list(&PostFilter::Author(fx.author.id), page)
        .await
        .unwrap();
    assert_eq!(by_author.len(), 2);
}

#[tokio::test]
async fn search_is_case_insensitive_and_literal() {
    let fx = fixture().await;
    fx.insert("Learning RUST", "learning-rust", true).await;
    fx.insert("Gardening", "gardening", true).await;
    fx.insert("Rusty drafts", "rusty-drafts", false).await;

    let page = PageRequest::default();
    let (found, total) = fx
        .posts
        .list(&PostFilter::Search("rust".into()), page)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].slug.as_str(), "learning-rust");

    let (wildcard, _) = fx
        .posts
        .list(&PostFilter::Search("%".into()), page)
        .await
        .unwrap();
    assert!(wildcard.is_empty());
}

#[tokio::test]
async fn pagination_reports_total_beyond_page() {
    let fx = fixture().await;
    for n in 0..5 {
        fx.insert(&format!("Post {n}"), &format!("post-{n}"), true).await;
    }

    let (items, total) = fx
        .posts
        .list(&PostFilter::Published, PageRequest::new(2, 2))
        .await
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].slug.as_str(), "post-2");
}

#[tokio::test]
async fn deleting_missing_post_is_not_found() {
    let fx = fixture().await;
    let post = fx.insert("Short lived", "short-lived", true).await;
    fx.posts.delete(post.id).await.unwrap();
    assert!(matches!(
        fx.posts.delete(post.id).await.unwrap_err(),
        DomainError::NotFound(_)
    ));
}

#[tokio::test]
async fn pages_list_hides_unpublished_unless_asked() {
    let fx = fixture().await;
    let pages = SqlitePageRepository::new(fx.pool.clone());
    for (slug, published) in [("about", true), ("secret", false)] {
        pages
            .insert(NewPage {
                title: PageTitle::new(slug).unwrap(),
                slug: Slug::new(slug).unwrap(),
                is_published: published,
                content: PageContent::new("text").unwrap(),
                created_at: support::FixedClock::instant(),
                updated_at: support::FixedClock::instant(),
            })
            .await
            .unwrap();
    }

    assert_eq!(pages.list(false).await.unwrap().len(), 1);
    assert_eq!(pages.list(true).await.unwrap().len(), 2);
}

#[tokio::test]
async fn site_setup_is_a_singleton_with_ordered_links() {
    let pool = support::memory_pool().await;
    let repo = SqliteSiteSetupRepository::new(pool);
    assert!(repo.get().await.unwrap().is_none());

    let link = |text: &str, target: &str| MenuLink {
        text: MenuText::new(text).unwrap(),
        url_or_path: LinkTarget::new(target).unwrap(),
        new_tab: false,
    };
    let setup = SiteSetup {
        title: SiteTitle::new("My Blog").unwrap(),
        description: SiteDescription::new("").unwrap(),
        visibility: SiteVisibility::default(),
        favicon: None,
        menu_links: vec![link("Home", "/"), link("About", "/page/about")],
    };
    repo.save(setup.clone()).await.unwrap();

    let mut replaced = setup;
    replaced.title = SiteTitle::new("Renamed").unwrap();
    replaced.visibility.show_footer = false;
    replaced.menu_links = vec![link("Zeta", "/z"), link("Alpha", "/a"), link("Mid", "/m")];
    repo.save(replaced.clone()).await.unwrap();

    let stored = repo.get().await.unwrap().unwrap();
    assert_eq!(stored, replaced);
    let texts: Vec<_> = stored.menu_links.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["Zeta", "Alpha", "Mid"]);
}
