// src/application/queries/pages.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, PageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{page::PageRepository, slug::Slug},
};

pub struct GetPageBySlugQuery {
    pub slug: String,
}

pub struct PageQueryService {
    page_repo: Arc<dyn PageRepository>,
}

impl PageQueryService {
    pub fn new(page_repo: Arc<dyn PageRepository>) -> Self {
        Self { page_repo }
    }

    /// Only published pages are reachable by slug.
    pub async fn get_page_by_slug(&self, query: GetPageBySlugQuery) -> ApplicationResult<PageDto> {
        let slug =
            Slug::new(query.slug).map_err(|_| ApplicationError::not_found("page not found"))?;
        self.page_repo
            .find_by_slug(&slug)
            .await?
            .filter(|page| page.is_published)
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("page not found"))
    }

    /// Page managers also see unpublished pages.
    pub async fn list_pages(
        &self,
        actor: Option<&AuthenticatedUser>,
    ) -> ApplicationResult<Vec<PageDto>> {
        let include_unpublished = actor.is_some_and(|user| user.has_capability("pages", "manage"));
        let pages = self.page_repo.list(include_unpublished).await?;
        Ok(pages.into_iter().map(Into::into).collect())
    }
}
