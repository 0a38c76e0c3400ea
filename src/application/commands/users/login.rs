use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{User, Username},
};

pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let username = Username::new(command.username.trim())
            .map_err(|_| ApplicationError::unauthorized("invalid credentials"))?;
        let user = self
            .find_and_authenticate_user(username, &command.password)
            .await?;

        let subject = TokenSubject {
            user_id: user.id,
            username: user.username.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
        };
        let token = self.token_manager.issue(subject).await?;

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    async fn find_and_authenticate_user(
        &self,
        username: Username,
        password: &str,
    ) -> ApplicationResult<User> {
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        if !user.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        self.password_hasher
            .verify(password, user.password_hash.as_str())
            .await?;

        Ok(user)
    }
}
