// src/domain/site/entity.rs
use crate::domain::media::ImageRef;
use crate::domain::site::value_objects::{LinkTarget, MenuText, SiteDescription, SiteTitle};

/// Toggles for the optional parts of every rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteVisibility {
    pub show_header: bool,
    pub show_search: bool,
    pub show_menu: bool,
    pub show_description: bool,
    pub show_pagination: bool,
    pub show_footer: bool,
}

impl Default for SiteVisibility {
    fn default() -> Self {
        Self {
            show_header: true,
            show_search: true,
            show_menu: true,
            show_description: true,
            show_pagination: true,
            show_footer: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub text: MenuText,
    pub url_or_path: LinkTarget,
    pub new_tab: bool,
}

/// The singleton site configuration. Menu links keep their stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSetup {
    pub title: SiteTitle,
    pub description: SiteDescription,
    pub visibility: SiteVisibility,
    pub favicon: Option<ImageRef>,
    pub menu_links: Vec<MenuLink>,
}
