use super::PostCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::{CanDeletePostSpec, PostId},
};

pub struct DeletePostCommand {
    pub id: i64,
}

impl PostCommandService {
    pub async fn delete_post(
        &self,
        actor: &AuthenticatedUser,
        command: DeletePostCommand,
    ) -> ApplicationResult<()> {
        let id = PostId::new(command.id)?;
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        if !CanDeletePostSpec::new(&actor.capabilities, &post, actor.id).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to delete post",
            ));
        }

        self.post_repo.delete(id).await?;
        tracing::info!(post_id = id.0, actor = actor.id.0, "post deleted");
        Ok(())
    }
}
