use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::text::bounded_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub i64);

impl PageId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("page id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PageId> for i64 {
    fn from(value: PageId) -> Self {
        value.0
    }
}

bounded_text!(PageTitle, "title", max = 65);
bounded_text!(PageContent, "content", max = 1_000_000);
