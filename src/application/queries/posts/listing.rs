// src/application/queries/posts/listing.rs
use super::PostQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, Paginated, PostDto, PostListingDto, SiteSetupDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        pagination::PageRequest,
        post::PostFilter,
        slug::Slug,
        user::UserId,
    },
};

/// Size of the "latest posts" strip.
pub const LATEST_POSTS: u32 = 5;

/// Which listing to render, as requested by the caller.
#[derive(Debug, Clone)]
pub enum PostListing {
    Published,
    Category { slug: String },
    Tag { slug: String },
    Author { id: i64 },
    Search { query: String },
    Drafts,
}

impl PostQueryService {
    /// Runs a listing and wraps it with its presentation context.
    ///
    /// `site` is the current site setup, used for the page title suffix and
    /// handed back unchanged.
    pub async fn list_posts(
        &self,
        actor: Option<&AuthenticatedUser>,
        site: Option<SiteSetupDto>,
        listing: PostListing,
        page: PageRequest,
    ) -> ApplicationResult<PostListingDto> {
        let (filter, label, heading) = self.resolve_listing(actor, listing).await?;

        let posts = match filter {
            Some(filter) => {
                let (records, total) = self.post_repo.list(&filter, page).await?;
                let items = records.into_iter().map(PostDto::from).collect();
                Paginated::new(items, page, total)
            }
            None => Paginated::empty(page),
        };

        let page_title = match &site {
            Some(site) => format!("{label} - {}", site.title),
            None => label,
        };

        Ok(PostListingDto {
            site,
            page_title,
            heading,
            posts,
        })
    }

    pub async fn latest_posts(&self) -> ApplicationResult<Vec<PostDto>> {
        let (records, _) = self
            .post_repo
            .list(&PostFilter::Published, PageRequest::first(LATEST_POSTS))
            .await?;
        Ok(records.into_iter().map(PostDto::from).collect())
    }

    /// Maps a listing to its filter, title and heading. A `None` filter
    /// means the result is empty without touching storage.
    async fn resolve_listing(
        &self,
        actor: Option<&AuthenticatedUser>,
        listing: PostListing,
    ) -> ApplicationResult<(Option<PostFilter>, String, Option<String>)> {
        match listing {
            PostListing::Published => Ok((Some(PostFilter::Published), "Home".into(), None)),
            PostListing::Category { slug } => {
                let slug = lookup_slug(slug, "category")?;
                let category = self
                    .category_repo
                    .find_by_slug(&slug)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("category not found"))?;
                Ok((
                    Some(PostFilter::Category(category.id)),
                    format!("Category: {}", category.name),
                    Some(format!("Category: \"{}\"", category.name)),
                ))
            }
            PostListing::Tag { slug } => {
                let slug = lookup_slug(slug, "tag")?;
                let tag = self
                    .tag_repo
                    .find_by_slug(&slug)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("tag not found"))?;
                Ok((
                    Some(PostFilter::Tag(tag.id)),
                    format!("Tag: {}", tag.name),
                    Some(format!("Tag: \"{}\"", tag.name)),
                ))
            }
            PostListing::Author { id } => {
                let id = UserId::new(id).map_err(|_| ApplicationError::not_found("author not found"))?;
                let author = self
                    .user_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("author not found"))?
                    .author();
                let name = author.shown_name().to_string();
                Ok((
                    Some(PostFilter::Author(author.id)),
                    format!("Posts by {name}"),
                    Some(format!("Posts by {name}")),
                ))
            }
            PostListing::Search { query } => {
                let query = query.trim().to_string();
                let heading = Some(format!("Search for \"{query}\""));
                let label = format!("Search: \"{query}\"");
                if query.is_empty() {
                    return Ok((None, label, heading));
                }
                Ok((Some(PostFilter::Search(query)), label, heading))
            }
            PostListing::Drafts => {
                let actor = actor
                    .ok_or_else(|| ApplicationError::unauthorized("authentication required"))?;
                Ok((
                    Some(PostFilter::Drafts(actor.id)),
                    "My drafts".into(),
                    Some("My drafts".into()),
                ))
            }
        }
    }
}

fn lookup_slug(raw: String, kind: &str) -> ApplicationResult<Slug> {
    Slug::new(raw).map_err(|_| ApplicationError::not_found(format!("{kind} not found")))
}
