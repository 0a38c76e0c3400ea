use super::PostCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::taxonomy::{Category, CategoryId, CategoryName, TagId, TagName, parse_tag_names},
};

/// How the author picked the post's category: an existing one, or a new name.
#[derive(Debug, Clone, Default)]
pub struct CategoryChoice {
    pub existing_id: Option<i64>,
    pub new_name: Option<String>,
}

impl PostCommandService {
    /// A typed name wins over a selected id and is created when unknown.
    pub(super) async fn resolve_category(
        &self,
        choice: CategoryChoice,
    ) -> ApplicationResult<Category> {
        let new_name = choice
            .new_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        if let Some(name) = new_name {
            return self
                .taxonomy
                .get_or_create_category(CategoryName::new(name)?)
                .await;
        }

        let id = choice.existing_id.ok_or_else(|| {
            ApplicationError::validation("choose an existing category or create a new one")
        })?;
        self.category_repo
            .find_by_id(CategoryId::new(id)?)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("category {id} not found")))
    }

    pub(super) async fn resolve_tags(&self, input: &str) -> ApplicationResult<Vec<TagId>> {
        let names: Vec<TagName> = parse_tag_names(input)?;
        let tags = self.taxonomy.get_or_create_tags(names).await?;
        Ok(tags.into_iter().map(|tag| tag.id).collect())
    }
}
