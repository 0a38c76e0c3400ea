use super::PostQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PostDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{post::CanViewPostSpec, slug::Slug},
};

pub struct GetPostBySlugQuery {
    pub slug: String,
}

impl PostQueryService {
    /// Drafts answer 404 to everyone except the user who created them.
    pub async fn get_post_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetPostBySlugQuery,
    ) -> ApplicationResult<PostDto> {
        let slug =
            Slug::new(query.slug).map_err(|_| ApplicationError::not_found("post not found"))?;
        let post = self
            .post_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        if !CanViewPostSpec::new(&post, actor.map(|user| user.id)).is_satisfied() {
            return Err(ApplicationError::not_found("post not found"));
        }

        Ok(post.into())
    }
}
