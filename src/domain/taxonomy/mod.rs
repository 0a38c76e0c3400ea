pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Category, NewCategory, NewTag, Tag};
pub use repository::{CategoryRepository, TagRepository};
pub use value_objects::{CategoryId, CategoryName, TagId, TagName, parse_tag_names};
