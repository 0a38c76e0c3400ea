use crate::domain::pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{posts::PostDto, site::SiteSetupDto};

/// One page of an offset-paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let per_page = u64::from(request.per_page());
        let total_pages = total.div_ceil(per_page);
        let page = request.page();
        Self {
            items,
            page,
            per_page: request.per_page(),
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_previous: page > 1,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }
}

/// A post listing together with what a front end needs to render it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostListingDto {
    pub site: Option<SiteSetupDto>,
    pub page_title: String,
    pub heading: Option<String>,
    pub posts: Paginated<PostDto>,
}
