// src/application/commands/posts/create.rs
use super::{CategoryChoice, PostCommandService};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, PostDto},
        error::ApplicationResult,
    },
    domain::{
        media::ImageRef,
        post::{Excerpt, NewPost, PostContent, PostTitle},
        slug::Slug,
    },
};

pub struct CreatePostCommand {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: Option<String>,
    pub cover: Option<String>,
    pub cover_in_post_content: bool,
    pub is_published: bool,
    pub category: CategoryChoice,
    /// Comma separated tag names.
    pub tags: Option<String>,
}

impl PostCommandService {
    pub async fn create_post(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePostCommand,
    ) -> ApplicationResult<PostDto> {
        ensure_capability(actor, "posts", "create")?;

        let title = PostTitle::new(command.title)?;
        let excerpt = Excerpt::new(command.excerpt)?;
        let content = PostContent::new(command.content)?;
        let cover = ImageRef::optional(command.cover)?;
        let requested_slug = Slug::optional(command.slug)?;

        let category = self.resolve_category(command.category).await?;
        let tag_ids = match command.tags.as_deref() {
            Some(input) => self.resolve_tags(input).await?,
            None => Vec::new(),
        };

        let slug = self
            .slugs
            .assign(title.as_str(), requested_slug, None)
            .await?;

        let new_post = NewPost {
            title,
            slug,
            excerpt,
            is_published: command.is_published,
            content,
            cover,
            cover_in_post_content: command.cover_in_post_content,
            category_id: category.id,
            tag_ids,
            created_by: actor.id,
            created_at: self.clock.now(),
        };

        let created = self.post_repo.insert(new_post).await?;
        tracing::info!(post_id = created.id.0, slug = %created.slug, "post created");

        self.images
            .normalize_on_save(None, created.cover.as_ref(), self.cover_width)
            .await;

        Ok(created.into())
    }
}
