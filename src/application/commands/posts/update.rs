// src/application/commands/posts/update.rs
use super::{CategoryChoice, PostCommandService};
use crate::{
    application::{
        dto::{AuthenticatedUser, PostDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        media::ImageRef,
        post::{CanUpdatePostSpec, Excerpt, Post, PostContent, PostId, PostTitle, PostUpdate},
    },
};

/// Partial update. `slug: Some("")` asks for a fresh slug derived from the
/// title and `cover: Some("")` removes the cover.
#[derive(Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub cover: Option<String>,
    pub cover_in_post_content: Option<bool>,
    pub is_published: Option<bool>,
    pub category: Option<CategoryChoice>,
    pub tags: Option<String>,
}

impl PostCommandService {
    pub async fn update_post(
        &self,
        actor: &AuthenticatedUser,
        command: UpdatePostCommand,
    ) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        if !CanUpdatePostSpec::new(&actor.capabilities, &post, actor.id).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to update post",
            ));
        }

        let previous_cover = post.cover.clone();
        let update = self.build_update(actor, &post, command).await?;
        let updated = self.post_repo.update(update).await?;
        tracing::info!(post_id = updated.id.0, slug = %updated.slug, "post updated");

        self.images
            .normalize_on_save(
                previous_cover.as_ref(),
                updated.cover.as_ref(),
                self.cover_width,
            )
            .await;

        Ok(updated.into())
    }

    async fn build_update(
        &self,
        actor: &AuthenticatedUser,
        post: &Post,
        command: UpdatePostCommand,
    ) -> ApplicationResult<PostUpdate> {
        let mut update = PostUpdate::new(post.id, actor.id, self.clock.now());

        let title = command.title.map(PostTitle::new).transpose()?;
        let source = title.as_ref().unwrap_or(&post.title);
        let slug = self
            .slugs
            .reassign(source.as_str(), command.slug, &post.slug, post.id.0)
            .await?;
        if slug != post.slug {
            update = update.with_slug(slug);
        }
        if let Some(title) = title {
            update = update.with_title(title);
        }

        if let Some(excerpt) = command.excerpt {
            update = update.with_excerpt(Excerpt::new(excerpt)?);
        }
        if let Some(content) = command.content {
            update = update.with_content(PostContent::new(content)?);
        }
        if let Some(cover) = command.cover {
            update = update.with_cover(ImageRef::optional(Some(cover))?);
        }
        if let Some(flag) = command.cover_in_post_content {
            update = update.with_cover_in_post_content(flag);
        }
        if let Some(is_published) = command.is_published {
            update = update.with_published(is_published);
        }
        if let Some(choice) = command.category {
            let category = self.resolve_category(choice).await?;
            update = update.with_category(category.id);
        }
        if let Some(tags) = command.tags {
            update = update.with_tags(self.resolve_tags(&tags).await?);
        }

        Ok(update)
    }
}
