// src/domain/slug/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::value_objects::Slug;
use async_trait::async_trait;

/// An entity type whose records carry a slug unique within one collection.
pub trait SlugCollection: Send + Sync + 'static {
    /// Storage name of the collection, also used in log output.
    const COLLECTION: &'static str;
}

/// Uniqueness lookup over the slugs of one collection.
#[async_trait]
pub trait SlugIndex<E: SlugCollection>: Send + Sync {
    /// Whether a record other than `exclude_id` already owns `slug`.
    async fn slug_taken(&self, slug: &Slug, exclude_id: Option<i64>) -> DomainResult<bool>;
}
