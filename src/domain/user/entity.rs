// src/domain/user/entity.rs
use crate::domain::user::value_objects::{DisplayName, PasswordHash, Role, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub display_name: Option<DisplayName>,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.to_string(),
            display_name: self.display_name.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub display_name: Option<DisplayName>,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        display_name: Option<DisplayName>,
        password_hash: PasswordHash,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            display_name,
            password_hash,
            role,
            is_active: true,
            created_at,
        }
    }
}

/// The public face of a user as shown next to their content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
}

impl Author {
    /// Display name when set, username otherwise.
    pub fn shown_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_name_prefers_display_name() {
        let mut author = Author {
            id: UserId::new(1).unwrap(),
            username: "ana".into(),
            display_name: Some("Ana Souza".into()),
        };
        assert_eq!(author.shown_name(), "Ana Souza");
        author.display_name = None;
        assert_eq!(author.shown_name(), "ana");
    }
}
