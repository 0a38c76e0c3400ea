// src/domain/post/entity.rs
use crate::domain::media::ImageRef;
use crate::domain::post::value_objects::{Excerpt, PostContent, PostId, PostTitle};
use crate::domain::slug::{Slug, SlugCollection};
use crate::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use crate::domain::user::{Author, UserId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: Slug,
    pub excerpt: Excerpt,
    pub is_published: bool,
    pub content: PostContent,
    pub cover: Option<ImageRef>,
    pub cover_in_post_content: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Author>,
    pub updated_by: Option<Author>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

impl Post {
    /// Canonical location of the post, or the site root while it is a draft.
    pub fn url(&self) -> String {
        if self.is_published {
            format!("/post/{}", self.slug)
        } else {
            "/".to_string()
        }
    }

    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.created_by
            .as_ref()
            .is_some_and(|author| author.id == user_id)
    }
}

impl SlugCollection for Post {
    const COLLECTION: &'static str = "posts";
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug: Slug,
    pub excerpt: Excerpt,
    pub is_published: bool,
    pub content: PostContent,
    pub cover: Option<ImageRef>,
    pub cover_in_post_content: bool,
    pub category_id: CategoryId,
    pub tag_ids: Vec<TagId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Partial update; `None` leaves a column untouched.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: Option<PostTitle>,
    pub slug: Option<Slug>,
    pub excerpt: Option<Excerpt>,
    pub is_published: Option<bool>,
    pub content: Option<PostContent>,
    pub cover: Option<Option<ImageRef>>,
    pub cover_in_post_content: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Option<Vec<TagId>>,
    pub updated_by: UserId,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: PostId, updated_by: UserId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            excerpt: None,
            is_published: None,
            content: None,
            cover: None,
            cover_in_post_content: None,
            category_id: None,
            tag_ids: None,
            updated_by,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: PostTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_excerpt(mut self, excerpt: Excerpt) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    pub fn with_published(mut self, is_published: bool) -> Self {
        self.is_published = Some(is_published);
        self
    }

    pub fn with_content(mut self, content: PostContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_cover(mut self, cover: Option<ImageRef>) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn with_cover_in_post_content(mut self, flag: bool) -> Self {
        self.cover_in_post_content = Some(flag);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<TagId>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }
}
