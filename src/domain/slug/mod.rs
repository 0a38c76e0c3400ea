pub mod repository;
pub mod services;
pub mod value_objects;

pub use repository::{SlugCollection, SlugIndex};
pub use services::SlugService;
pub use value_objects::Slug;
