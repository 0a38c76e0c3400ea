// src/domain/taxonomy/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::text::bounded_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("category id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CategoryId> for i64 {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(pub i64);

impl TagId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("tag id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<TagId> for i64 {
    fn from(value: TagId) -> Self {
        value.0
    }
}

bounded_text!(CategoryName, "category name", max = 100);
bounded_text!(TagName, "tag name", max = 100);

/// Splits a comma separated tag list, trimming names and dropping blanks and
/// repeats while keeping the first-seen order.
pub fn parse_tag_names(input: &str) -> DomainResult<Vec<TagName>> {
    let mut names: Vec<TagName> = Vec::new();
    for raw in input.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() || names.iter().any(|name| name.as_str() == trimmed) {
            continue;
        }
        names.push(TagName::new(trimmed)?);
    }
    Ok(names)
}
