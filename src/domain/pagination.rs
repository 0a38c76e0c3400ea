// src/domain/pagination.rs

/// One-based page selection for offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u32 = 9;
    pub const MAX_PER_PAGE: u32 = 100;

    /// Out-of-range values are clamped rather than rejected.
    pub fn new(page: u32, per_page: u32) -> Self {
        let per_page = if per_page == 0 {
            Self::DEFAULT_PER_PAGE
        } else {
            per_page.min(Self::MAX_PER_PAGE)
        };
        Self {
            page: page.max(1),
            per_page,
        }
    }

    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(Self::DEFAULT_PER_PAGE)
    }
}
