use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::text::bounded_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl PostId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("post id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PostId> for i64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

bounded_text!(PostTitle, "title", max = 60);
bounded_text!(
    /// Short summary shown in listings.
    Excerpt,
    "excerpt",
    max = 150
);
bounded_text!(PostContent, "content", max = 1_000_000);
