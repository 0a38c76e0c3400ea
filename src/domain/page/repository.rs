use crate::domain::errors::DomainResult;
use crate::domain::page::entity::{NewPage, Page, PageUpdate};
use crate::domain::page::value_objects::PageId;
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn insert(&self, page: NewPage) -> DomainResult<Page>;
    async fn update(&self, update: PageUpdate) -> DomainResult<Page>;
    async fn delete(&self, id: PageId) -> DomainResult<()>;
    async fn find_by_id(&self, id: PageId) -> DomainResult<Option<Page>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Page>>;
    async fn list(&self, include_unpublished: bool) -> DomainResult<Vec<Page>>;
}
