pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{NewPost, Post, PostUpdate};
pub use repository::{PostFilter, PostRepository};
pub use specifications::{CanDeletePostSpec, CanUpdatePostSpec, CanViewPostSpec};
pub use value_objects::{Excerpt, PostContent, PostId, PostTitle};
