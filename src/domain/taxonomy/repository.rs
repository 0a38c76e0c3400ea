use crate::domain::errors::DomainResult;
use crate::domain::slug::Slug;
use crate::domain::taxonomy::entity::{Category, NewCategory, NewTag, Tag};
use crate::domain::taxonomy::value_objects::{CategoryId, CategoryName, TagName};
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>>;
    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>>;
    async fn list(&self) -> DomainResult<Vec<Category>>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>>;
    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>>;
    async fn list(&self) -> DomainResult<Vec<Tag>>;
}
