// src/domain/site/value_objects.rs
use crate::domain::text::bounded_text;

bounded_text!(SiteTitle, "site title", max = 65);
bounded_text!(SiteDescription, "site description", max = 255, allow_blank = true);
bounded_text!(MenuText, "menu text", max = 50);
bounded_text!(
    /// Absolute URL or site-relative path a menu link points at.
    LinkTarget,
    "menu link url",
    max = 2048
);
