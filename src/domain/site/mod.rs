pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{MenuLink, SiteSetup, SiteVisibility};
pub use repository::SiteSetupRepository;
pub use value_objects::{LinkTarget, MenuText, SiteDescription, SiteTitle};
