// src/application/commands/pages.rs
use std::sync::Arc;

use super::capability::ensure_capability;
use crate::{
    application::{
        dto::{AuthenticatedUser, PageDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        page::{NewPage, Page, PageContent, PageId, PageRepository, PageTitle, PageUpdate},
        slug::{Slug, SlugService},
    },
};

pub struct CreatePageCommand {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub is_published: bool,
}

/// `slug: Some("")` regenerates the slug from the title.
#[derive(Default)]
pub struct UpdatePageCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

pub struct PageCommandService {
    page_repo: Arc<dyn PageRepository>,
    slugs: Arc<SlugService<Page>>,
    clock: Arc<dyn Clock>,
}

impl PageCommandService {
    pub fn new(
        page_repo: Arc<dyn PageRepository>,
        slugs: Arc<SlugService<Page>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            page_repo,
            slugs,
            clock,
        }
    }

    pub async fn create_page(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePageCommand,
    ) -> ApplicationResult<PageDto> {
        ensure_capability(actor, "pages", "manage")?;

        let title = PageTitle::new(command.title)?;
        let content = PageContent::new(command.content)?;
        let requested_slug = Slug::optional(command.slug)?;
        let slug = self
            .slugs
            .assign(title.as_str(), requested_slug, None)
            .await?;

        let now = self.clock.now();
        let page = self
            .page_repo
            .insert(NewPage {
                title,
                slug,
                is_published: command.is_published,
                content,
                created_at: now,
                updated_at: now,
            })
            .await?;
        tracing::info!(page_id = page.id.0, slug = %page.slug, "page created");
        Ok(page.into())
    }

    pub async fn update_page(
        &self,
        actor: &AuthenticatedUser,
        command: UpdatePageCommand,
    ) -> ApplicationResult<PageDto> {
        ensure_capability(actor, "pages", "manage")?;

        let id = PageId::new(command.id)?;
        let page = self
            .page_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("page not found"))?;

        let mut update = PageUpdate::new(id, self.clock.now());
        let title = command.title.map(PageTitle::new).transpose()?;
        let source = title.as_ref().unwrap_or(&page.title);
        let slug = self
            .slugs
            .reassign(source.as_str(), command.slug, &page.slug, page.id.0)
            .await?;
        if slug != page.slug {
            update = update.with_slug(slug);
        }
        if let Some(title) = title {
            update = update.with_title(title);
        }
        if let Some(content) = command.content {
            update = update.with_content(PageContent::new(content)?);
        }
        if let Some(is_published) = command.is_published {
            update = update.with_published(is_published);
        }

        let updated = self.page_repo.update(update).await?;
        tracing::info!(page_id = updated.id.0, slug = %updated.slug, "page updated");
        Ok(updated.into())
    }

    pub async fn delete_page(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "pages", "manage")?;
        let id = PageId::new(id)?;
        if self.page_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("page not found"));
        }
        self.page_repo.delete(id).await?;
        tracing::info!(page_id = id.0, "page deleted");
        Ok(())
    }
}
