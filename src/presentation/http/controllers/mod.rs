// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod media;
pub mod pages;
pub mod posts;
pub mod site;
pub mod taxonomy;
