// src/infrastructure/repositories/slug_index.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugCollection, SlugIndex};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Uniqueness lookup over the `slug` column of any collection's table.
#[derive(Clone)]
pub struct SqliteSlugIndex {
    pool: SqlitePool,
}

impl SqliteSlugIndex {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<E: SlugCollection> SlugIndex<E> for SqliteSlugIndex {
    async fn slug_taken(&self, slug: &Slug, exclude_id: Option<i64>) -> DomainResult<bool> {
        // Table names come from a compile-time constant, never from input.
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = ? AND id != ?)",
            E::COLLECTION
        );
        let taken = sqlx::query_scalar::<_, i64>(&sql)
            .bind(slug.as_str())
            .bind(exclude_id.unwrap_or(0))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(taken != 0)
    }
}
