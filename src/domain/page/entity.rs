// src/domain/page/entity.rs
use crate::domain::page::value_objects::{PageContent, PageId, PageTitle};
use crate::domain::slug::{Slug, SlugCollection};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Page {
    pub id: PageId,
    pub title: PageTitle,
    pub slug: Slug,
    pub is_published: bool,
    pub content: PageContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Canonical location of the page, or the site root while it is hidden.
    pub fn url(&self) -> String {
        if self.is_published {
            format!("/page/{}", self.slug)
        } else {
            "/".to_string()
        }
    }
}

impl SlugCollection for Page {
    const COLLECTION: &'static str = "pages";
}

#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: PageTitle,
    pub slug: Slug,
    pub is_published: bool,
    pub content: PageContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PageUpdate {
    pub id: PageId,
    pub title: Option<PageTitle>,
    pub slug: Option<Slug>,
    pub is_published: Option<bool>,
    pub content: Option<PageContent>,
    pub updated_at: DateTime<Utc>,
}

impl PageUpdate {
    pub fn new(id: PageId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            is_published: None,
            content: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: PageTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_published(mut self, is_published: bool) -> Self {
        self.is_published = Some(is_published);
        self
    }

    pub fn with_content(mut self, content: PageContent) -> Self {
        self.content = Some(content);
        self
    }
}
