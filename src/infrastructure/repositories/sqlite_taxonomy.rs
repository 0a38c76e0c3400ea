// src/infrastructure/repositories/sqlite_taxonomy.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use crate::domain::taxonomy::{
    Category, CategoryId, CategoryName, CategoryRepository, NewCategory, NewTag, Tag, TagId,
    TagName, TagRepository,
};
use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, FromRow)]
struct TermRow {
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<TermRow> for Category {
    type Error = DomainError;

    fn try_from(row: TermRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            slug: Slug::new(row.slug)?,
        })
    }
}

impl TryFrom<TermRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TermRow) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId::new(row.id)?,
            name: TagName::new(row.name)?,
            slug: Slug::new(row.slug)?,
        })
    }
}

#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let row = sqlx::query_as::<_, TermRow>(
            "INSERT INTO categories (name, slug) VALUES (?, ?) RETURNING id, name, slug",
        )
        .bind(category.name.as_str())
        .bind(category.slug.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Category::try_from(row)
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let row = sqlx::query_as::<_, TermRow>("SELECT id, name, slug FROM categories WHERE id = ?")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        let row =
            sqlx::query_as::<_, TermRow>("SELECT id, name, slug FROM categories WHERE slug = ?")
                .bind(slug.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        let row = sqlx::query_as::<_, TermRow>(
            "SELECT id, name, slug FROM categories WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, TermRow>(
            "SELECT id, name, slug FROM categories ORDER BY name COLLATE NOCASE, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }
}

#[derive(Clone)]
pub struct SqliteTagRepository {
    pool: SqlitePool,
}

impl SqliteTagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let row = sqlx::query_as::<_, TermRow>(
            "INSERT INTO tags (name, slug) VALUES (?, ?) RETURNING id, name, slug",
        )
        .bind(tag.name.as_str())
        .bind(tag.slug.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Tag::try_from(row)
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TermRow>("SELECT id, name, slug FROM tags WHERE slug = ?")
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Tag::try_from).transpose()
    }

    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TermRow>(
            "SELECT id, name, slug FROM tags WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Tag::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TermRow>(
            "SELECT id, name, slug FROM tags ORDER BY name COLLATE NOCASE, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Tag::try_from).collect()
    }
}
