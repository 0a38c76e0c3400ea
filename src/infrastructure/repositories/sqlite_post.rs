// src/infrastructure/repositories/sqlite_post.rs
use std::collections::HashMap;

use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::ImageRef;
use crate::domain::pagination::PageRequest;
use crate::domain::post::{
    Excerpt, NewPost, Post, PostContent, PostFilter, PostId, PostRepository, PostTitle,
    PostUpdate,
};
use crate::domain::slug::Slug;
use crate::domain::taxonomy::{Category, CategoryId, CategoryName, Tag, TagId, TagName};
use crate::domain::user::{Author, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const POST_SELECT: &str = "SELECT p.id, p.title, p.slug, p.excerpt, p.is_published, p.content, \
     p.cover, p.cover_in_post_content, p.created_at, p.updated_at, \
     p.created_by, cu.username AS created_by_username, cu.display_name AS created_by_display_name, \
     p.updated_by, uu.username AS updated_by_username, uu.display_name AS updated_by_display_name, \
     p.category_id, c.name AS category_name, c.slug AS category_slug \
     FROM posts p \
     LEFT JOIN users cu ON cu.id = p.created_by \
     LEFT JOIN users uu ON uu.id = p.updated_by \
     LEFT JOIN categories c ON c.id = p.category_id";

#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    excerpt: String,
    is_published: bool,
    content: String,
    cover: Option<String>,
    cover_in_post_content: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Option<i64>,
    created_by_username: Option<String>,
    created_by_display_name: Option<String>,
    updated_by: Option<i64>,
    updated_by_username: Option<String>,
    updated_by_display_name: Option<String>,
    category_id: Option<i64>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

#[derive(Debug, FromRow)]
struct PostTagRow {
    post_id: i64,
    id: i64,
    name: String,
    slug: String,
}

fn author(
    id: Option<i64>,
    username: Option<String>,
    display_name: Option<String>,
) -> DomainResult<Option<Author>> {
    match (id, username) {
        (Some(id), Some(username)) => Ok(Some(Author {
            id: UserId::new(id)?,
            username,
            display_name,
        })),
        _ => Ok(None),
    }
}

impl PostRow {
    fn into_post(self, tags: Vec<Tag>) -> DomainResult<Post> {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category {
                id: CategoryId::new(id)?,
                name: CategoryName::new(name)?,
                slug: Slug::new(slug)?,
            }),
            _ => None,
        };

        Ok(Post {
            id: PostId::new(self.id)?,
            title: PostTitle::new(self.title)?,
            slug: Slug::new(self.slug)?,
            excerpt: Excerpt::new(self.excerpt)?,
            is_published: self.is_published,
            content: PostContent::new(self.content)?,
            cover: ImageRef::optional(self.cover)?,
            cover_in_post_content: self.cover_in_post_content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by: author(
                self.created_by,
                self.created_by_username,
                self.created_by_display_name,
            )?,
            updated_by: author(
                self.updated_by,
                self.updated_by_username,
                self.updated_by_display_name,
            )?,
            category,
            tags,
        })
    }
}

/// Appends the WHERE clause selecting the posts of one listing.
fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a PostFilter) {
    match filter {
        PostFilter::Drafts(user_id) => {
            builder
                .push(" WHERE p.is_published = 0 AND p.created_by = ")
                .push_bind(user_id.0);
            return;
        }
        _ => {
            builder.push(" WHERE p.is_published = 1");
        }
    }

    match filter {
        PostFilter::Published | PostFilter::Drafts(_) => {}
        PostFilter::Category(category_id) => {
            builder.push(" AND p.category_id = ").push_bind(category_id.0);
        }
        PostFilter::Tag(tag_id) => {
            builder
                .push(" AND EXISTS (SELECT 1 FROM post_tags pt WHERE pt.post_id = p.id AND pt.tag_id = ")
                .push_bind(tag_id.0)
                .push(")");
        }
        PostFilter::Author(user_id) => {
            builder.push(" AND p.created_by = ").push_bind(user_id.0);
        }
        PostFilter::Search(term) => {
            let pattern = like_pattern(term);
            builder.push(" AND (p.title LIKE ");
            builder.push_bind(pattern.clone()).push(" ESCAPE '\\'");
            builder.push(" OR p.excerpt LIKE ");
            builder.push_bind(pattern.clone()).push(" ESCAPE '\\'");
            builder.push(" OR p.content LIKE ");
            builder.push_bind(pattern).push(" ESCAPE '\\')");
        }
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl SqlitePostRepository {
    async fn load_tags(&self, post_ids: &[i64]) -> DomainResult<HashMap<i64, Vec<Tag>>> {
        let mut by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
        if post_ids.is_empty() {
            return Ok(by_post);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT pt.post_id, t.id, t.name, t.slug FROM post_tags pt \
             JOIN tags t ON t.id = pt.tag_id WHERE pt.post_id IN (",
        );
        let mut ids = builder.separated(", ");
        for id in post_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY t.name COLLATE NOCASE, t.id");

        let rows = builder
            .build_query_as::<PostTagRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        for row in rows {
            let tag = Tag {
                id: TagId::new(row.id)?,
                name: TagName::new(row.name)?,
                slug: Slug::new(row.slug)?,
            };
            by_post.entry(row.post_id).or_default().push(tag);
        }
        Ok(by_post)
    }

    async fn hydrate(&self, rows: Vec<PostRow>) -> DomainResult<Vec<Post>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut tags = self.load_tags(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let post_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_post(post_tags)
            })
            .collect()
    }

    async fn fetch_one(&self, id: i64) -> DomainResult<Post> {
        self.find_by_id(PostId::new(id)?)
            .await?
            .ok_or_else(|| DomainError::Persistence(format!("post {id} vanished after write")))
    }
}

async fn replace_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tag_ids: &[TagId],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT OR IGNORE INTO post_tags (post_id, tag_id) ");
    builder.push_values(tag_ids, |mut row, tag_id| {
        row.push_bind(post_id).push_bind(tag_id.0);
    });
    builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            slug,
            excerpt,
            is_published,
            content,
            cover,
            cover_in_post_content,
            category_id,
            tag_ids,
            created_by,
            created_at,
        } = post;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO posts (title, slug, excerpt, is_published, content, cover, \
             cover_in_post_content, created_at, updated_at, created_by, updated_by, category_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(excerpt.as_str())
        .bind(is_published)
        .bind(content.as_str())
        .bind(cover.as_ref().map(ImageRef::as_str))
        .bind(cover_in_post_content)
        .bind(created_at)
        .bind(created_at)
        .bind(i64::from(created_by))
        .bind(i64::from(created_by))
        .bind(i64::from(category_id))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        replace_tags(&mut *tx, id, &tag_ids).await?;
        tx.commit().await.map_err(map_sqlx)?;

        self.fetch_one(id).await
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            slug,
            excerpt,
            is_published,
            content,
            cover,
            cover_in_post_content,
            category_id,
            tag_ids,
            updated_by,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);
        builder.push(", updated_by = ").push_bind(i64::from(updated_by));
        if let Some(title) = title {
            builder.push(", title = ").push_bind(title.into_inner());
        }
        if let Some(slug) = slug {
            builder.push(", slug = ").push_bind(slug.into_inner());
        }
        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ").push_bind(excerpt.into_inner());
        }
        if let Some(is_published) = is_published {
            builder.push(", is_published = ").push_bind(is_published);
        }
        if let Some(content) = content {
            builder.push(", content = ").push_bind(content.into_inner());
        }
        if let Some(cover) = cover {
            builder
                .push(", cover = ")
                .push_bind(cover.map(ImageRef::into_inner));
        }
        if let Some(flag) = cover_in_post_content {
            builder.push(", cover_in_post_content = ").push_bind(flag);
        }
        if let Some(category_id) = category_id {
            builder.push(", category_id = ").push_bind(category_id.0);
        }
        builder.push(" WHERE id = ").push_bind(i64::from(id));

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("post not found"));
        }
        if let Some(tag_ids) = tag_ids {
            replace_tags(&mut *tx, id.0, &tag_ids).await?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        self.fetch_one(id.0).await
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("post not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.id = ?"))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.slug = ?"))
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &PostFilter, page: PageRequest) -> DomainResult<(Vec<Post>, u64)> {
        let mut count_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(1) FROM posts p");
        push_filter(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut list_builder: QueryBuilder<Sqlite> = QueryBuilder::new(POST_SELECT);
        push_filter(&mut list_builder, filter);
        list_builder
            .push(" ORDER BY p.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = list_builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let posts = self.hydrate(rows).await?;
        Ok((posts, total.unsigned_abs()))
    }
}
