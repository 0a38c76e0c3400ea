// src/domain/taxonomy/entity.rs
use crate::domain::slug::{Slug, SlugCollection};
use crate::domain::taxonomy::value_objects::{CategoryId, CategoryName, TagId, TagName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
}

impl SlugCollection for Category {
    const COLLECTION: &'static str = "categories";
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
    pub slug: Slug,
}

impl SlugCollection for Tag {
    const COLLECTION: &'static str = "tags";
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: TagName,
    pub slug: Slug,
}
