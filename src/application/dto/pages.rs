use crate::domain::page::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub is_published: bool,
    pub content: String,
    pub url: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Page> for PageDto {
    fn from(page: Page) -> Self {
        let url = page.url();
        Self {
            id: page.id.into(),
            title: page.title.into_inner(),
            slug: page.slug.into_inner(),
            is_published: page.is_published,
            content: page.content.into_inner(),
            url,
            created_at: page.created_at,
            updated_at: page.updated_at,
        }
    }
}
