mod detail;
mod listing;
mod service;

pub use detail::GetPostBySlugQuery;
pub use listing::{LATEST_POSTS, PostListing};
pub use service::PostQueryService;
