pub mod errors;
pub mod media;
pub mod page;
pub mod pagination;
pub mod post;
pub mod site;
pub mod slug;
pub mod taxonomy;
pub mod text;
pub mod user;
