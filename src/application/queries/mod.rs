// src/application/queries/mod.rs
pub mod pages;
pub mod posts;
pub mod site;
pub mod taxonomy;
pub mod users;
