// src/application/commands/taxonomy.rs
use std::sync::Arc;

use super::capability::ensure_capability;
use crate::{
    application::{
        dto::{AuthenticatedUser, CategoryDto, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        slug::SlugService,
        taxonomy::{
            Category, CategoryName, CategoryRepository, NewCategory, NewTag, Tag, TagName,
            TagRepository,
        },
    },
};

pub struct CreateCategoryCommand {
    pub name: String,
}

pub struct CreateTagCommand {
    pub name: String,
}

pub struct TaxonomyCommandService {
    category_repo: Arc<dyn CategoryRepository>,
    tag_repo: Arc<dyn TagRepository>,
    category_slugs: Arc<SlugService<Category>>,
    tag_slugs: Arc<SlugService<Tag>>,
}

impl TaxonomyCommandService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        tag_repo: Arc<dyn TagRepository>,
        category_slugs: Arc<SlugService<Category>>,
        tag_slugs: Arc<SlugService<Tag>>,
    ) -> Self {
        Self {
            category_repo,
            tag_repo,
            category_slugs,
            tag_slugs,
        }
    }

    pub async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "pages", "manage")?;
        let name = CategoryName::new(command.name.trim())?;
        if self.category_repo.find_by_name(&name).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "category '{name}' already exists"
            )));
        }
        Ok(self.insert_category(name).await?.into())
    }

    pub async fn create_tag(
        &self,
        actor: &AuthenticatedUser,
        command: CreateTagCommand,
    ) -> ApplicationResult<TagDto> {
        ensure_capability(actor, "pages", "manage")?;
        let name = TagName::new(command.name.trim())?;
        if self.tag_repo.find_by_name(&name).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "tag '{name}' already exists"
            )));
        }
        Ok(self.insert_tag(name).await?.into())
    }

    /// Looks a category up by its exact name, creating it when absent.
    pub async fn get_or_create_category(&self, name: CategoryName) -> ApplicationResult<Category> {
        if let Some(existing) = self.category_repo.find_by_name(&name).await? {
            return Ok(existing);
        }
        self.insert_category(name).await
    }

    pub async fn get_or_create_tags(&self, names: Vec<TagName>) -> ApplicationResult<Vec<Tag>> {
        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            let tag = match self.tag_repo.find_by_name(&name).await? {
                Some(existing) => existing,
                None => self.insert_tag(name).await?,
            };
            tags.push(tag);
        }
        Ok(tags)
    }

    async fn insert_category(&self, name: CategoryName) -> ApplicationResult<Category> {
        let slug = self.category_slugs.assign(name.as_str(), None, None).await?;
        let category = self.category_repo.insert(NewCategory { name, slug }).await?;
        tracing::info!(category_id = category.id.0, slug = %category.slug, "category created");
        Ok(category)
    }

    async fn insert_tag(&self, name: TagName) -> ApplicationResult<Tag> {
        let slug = self.tag_slugs.assign(name.as_str(), None, None).await?;
        let tag = self.tag_repo.insert(NewTag { name, slug }).await?;
        tracing::info!(tag_id = tag.id.0, slug = %tag.slug, "tag created");
        Ok(tag)
    }
}
