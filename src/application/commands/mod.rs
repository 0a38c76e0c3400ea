// src/application/commands/mod.rs
pub(crate) mod capability;
pub mod media;
pub mod pages;
pub mod posts;
pub mod site;
pub mod taxonomy;
pub mod users;
