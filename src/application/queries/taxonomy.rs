use std::sync::Arc;

use crate::{
    application::{
        dto::{CategoryDto, TagDto},
        error::ApplicationResult,
    },
    domain::taxonomy::{CategoryRepository, TagRepository},
};

pub struct TaxonomyQueryService {
    category_repo: Arc<dyn CategoryRepository>,
    tag_repo: Arc<dyn TagRepository>,
}

impl TaxonomyQueryService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>, tag_repo: Arc<dyn TagRepository>) -> Self {
        Self {
            category_repo,
            tag_repo,
        }
    }

    pub async fn list_categories(&self) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.category_repo.list().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn list_tags(&self) -> ApplicationResult<Vec<TagDto>> {
        let tags = self.tag_repo.list().await?;
        Ok(tags.into_iter().map(Into::into).collect())
    }
}
