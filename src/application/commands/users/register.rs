use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{DisplayName, NewUser, PasswordHash, Role, User, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl UserCommandService {
    /// Public sign-up. The very first account becomes the administrator.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username.trim())?;
        validate_password(&command.password)?;
        let display_name = command
            .display_name
            .filter(|name| !name.trim().is_empty())
            .map(DisplayName::new)
            .transpose()?;

        let existing = self.user_repo.count().await?;
        let role = if existing == 0 {
            Role::Admin
        } else {
            Role::Author
        };

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let user = self
            .create_and_insert_user(username, display_name, &command.password, role)
            .await?;
        tracing::info!(user_id = user.id.0, role = %user.role, "user registered");

        Ok(user.into())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        display_name: Option<DisplayName>,
        password: &str,
        role: Role,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let created_at = self.clock.now();
        let new_user = NewUser::new(username, display_name, password_hash, role, created_at);
        let user = self.user_repo.insert(new_user).await?;

        Ok(user)
    }
}
