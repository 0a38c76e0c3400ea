pub mod auth;
pub mod media;
pub mod pages;
pub mod pagination;
pub mod posts;
pub mod serde_time;
pub mod site;
pub mod taxonomy;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use media::StoredMediaDto;
pub use pages::PageDto;
pub use pagination::{Paginated, PostListingDto};
pub use posts::PostDto;
pub use site::{MenuLinkDto, SiteSetupDto};
pub use taxonomy::{CategoryDto, TagDto};
pub use users::{AuthorDto, CapabilityView, UserDto, UserProfileDto};
