// src/domain/slug/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Hyphen separated runs of word characters, underscores excluded.
static SLUG_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w&&[^_]]+(?:-[\w&&[^_]]+)*$").expect("slug shape pattern"));

/// A URL-safe identifier, unique within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Matches the width of every `slug` column.
    pub const MAX_CHARS: usize = 100;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("slug cannot be empty"));
        }
        if value.chars().count() > Self::MAX_CHARS {
            return Err(DomainError::validation(format!(
                "slug must be at most {} characters",
                Self::MAX_CHARS
            )));
        }
        if value.chars().any(char::is_uppercase) || !SLUG_SHAPE.is_match(&value) {
            return Err(DomainError::validation(format!(
                "slug '{value}' must contain only lowercase word characters separated by single hyphens"
            )));
        }
        Ok(Self(value))
    }

    /// A blank input means "no slug yet", leaving the assigner to derive one.
    pub fn optional(value: Option<String>) -> DomainResult<Option<Self>> {
        value
            .filter(|raw| !raw.trim().is_empty())
            .map(Self::new)
            .transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
