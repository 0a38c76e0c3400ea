// src/infrastructure/repositories/sqlite_page.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::page::{
    NewPage, Page, PageContent, PageId, PageRepository, PageTitle, PageUpdate,
};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

const PAGE_COLUMNS: &str = "id, title, slug, is_published, content, created_at, updated_at";

#[derive(Clone)]
pub struct SqlitePageRepository {
    pool: SqlitePool,
}

impl SqlitePageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PageRow {
    id: i64,
    title: String,
    slug: String,
    is_published: bool,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PageRow> for Page {
    type Error = DomainError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        Ok(Page {
            id: PageId::new(row.id)?,
            title: PageTitle::new(row.title)?,
            slug: Slug::new(row.slug)?,
            is_published: row.is_published,
            content: PageContent::new(row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PageRepository for SqlitePageRepository {
    async fn insert(&self, page: NewPage) -> DomainResult<Page> {
        let NewPage {
            title,
            slug,
            is_published,
            content,
            created_at,
            updated_at,
        } = page;

        let row = sqlx::query_as::<_, PageRow>(&format!(
            "INSERT INTO pages (title, slug, is_published, content, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {PAGE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(is_published)
        .bind(content.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Page::try_from(row)
    }

    async fn update(&self, update: PageUpdate) -> DomainResult<Page> {
        let PageUpdate {
            id,
            title,
            slug,
            is_published,
            content,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE pages SET updated_at = ");
        builder.push_bind(updated_at);
        if let Some(title) = title {
            builder.push(", title = ").push_bind(title.into_inner());
        }
        if let Some(slug) = slug {
            builder.push(", slug = ").push_bind(slug.into_inner());
        }
        if let Some(is_published) = is_published {
            builder.push(", is_published = ").push_bind(is_published);
        }
        if let Some(content) = content {
            builder.push(", content = ").push_bind(content.into_inner());
        }
        builder.push(" WHERE id = ").push_bind(i64::from(id));
        builder.push(format!(" RETURNING {PAGE_COLUMNS}"));

        let row = builder
            .build_query_as::<PageRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::not_found("page not found"))?;

        Page::try_from(row)
    }

    async fn delete(&self, id: PageId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("page not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: PageId) -> DomainResult<Option<Page>> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Page::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Page>> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Page::try_from).transpose()
    }

    async fn list(&self, include_unpublished: bool) -> DomainResult<Vec<Page>> {
        let filter = if include_unpublished {
            ""
        } else {
            " WHERE is_published = 1"
        };
        let rows = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages{filter} ORDER BY title COLLATE NOCASE, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Page::try_from).collect()
    }
}
