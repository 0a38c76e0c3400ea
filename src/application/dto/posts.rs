use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    serde_time,
    taxonomy::{CategoryDto, TagDto},
    users::AuthorDto,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub is_published: bool,
    pub content: String,
    /// Media reference of the cover image, relative to the media root.
    pub cover: Option<String>,
    pub cover_in_post_content: bool,
    /// `/post/{slug}` once published, `/` for drafts.
    pub url: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<AuthorDto>,
    pub updated_by: Option<AuthorDto>,
    pub category: Option<CategoryDto>,
    pub tags: Vec<TagDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let url = post.url();
        Self {
            id: post.id.into(),
            title: post.title.into_inner(),
            slug: post.slug.into_inner(),
            excerpt: post.excerpt.into_inner(),
            is_published: post.is_published,
            content: post.content.into_inner(),
            cover: post.cover.map(String::from),
            cover_in_post_content: post.cover_in_post_content,
            url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            created_by: post.created_by.map(AuthorDto::from),
            updated_by: post.updated_by.map(AuthorDto::from),
            category: post.category.map(CategoryDto::from),
            tags: post.tags.into_iter().map(TagDto::from).collect(),
        }
    }
}
