use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::post::entity::{NewPost, Post, PostUpdate};
use crate::domain::post::value_objects::PostId;
use crate::domain::slug::Slug;
use crate::domain::taxonomy::{CategoryId, TagId};
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Which posts a listing selects. Every variant except `Drafts` only sees
/// published posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    Published,
    Category(CategoryId),
    Tag(TagId),
    Author(UserId),
    /// Case-insensitive substring match over title, excerpt and content.
    Search(String),
    /// Unpublished posts created by the given user.
    Drafts(UserId),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;
    async fn delete(&self, id: PostId) -> DomainResult<()>;
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>>;
    /// Newest first. Returns the page plus the total number of matches.
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> DomainResult<(Vec<Post>, u64)>;
}
