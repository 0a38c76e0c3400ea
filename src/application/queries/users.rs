// src/application/queries/users.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, UserProfileDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::user::UserRepository,
};

pub struct UserQueryService {
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        Ok(UserProfileDto::from_parts(user, actor, self.clock.now()))
    }
}
