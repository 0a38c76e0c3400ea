// src/infrastructure/repositories/mod.rs
mod error;
mod slug_index;
mod sqlite_page;
mod sqlite_post;
mod sqlite_site;
mod sqlite_taxonomy;
mod sqlite_user;

pub use error::map_sqlx;
pub use slug_index::SqliteSlugIndex;
pub use sqlite_page::SqlitePageRepository;
pub use sqlite_post::SqlitePostRepository;
pub use sqlite_site::SqliteSiteSetupRepository;
pub use sqlite_taxonomy::{SqliteCategoryRepository, SqliteTagRepository};
pub use sqlite_user::SqliteUserRepository;
