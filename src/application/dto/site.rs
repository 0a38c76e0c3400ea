use crate::domain::site::{MenuLink, SiteSetup};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MenuLinkDto {
    pub text: String,
    pub url_or_path: String,
    pub new_tab: bool,
}

impl From<MenuLink> for MenuLinkDto {
    fn from(link: MenuLink) -> Self {
        Self {
            text: link.text.into_inner(),
            url_or_path: link.url_or_path.into_inner(),
            new_tab: link.new_tab,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SiteSetupDto {
    pub title: String,
    pub description: String,
    pub show_header: bool,
    pub show_search: bool,
    pub show_menu: bool,
    pub show_description: bool,
    pub show_pagination: bool,
    pub show_footer: bool,
    pub favicon: Option<String>,
    pub menu_links: Vec<MenuLinkDto>,
}

impl From<SiteSetup> for SiteSetupDto {
    fn from(setup: SiteSetup) -> Self {
        let visibility = setup.visibility;
        Self {
            title: setup.title.into_inner(),
            description: setup.description.into_inner(),
            show_header: visibility.show_header,
            show_search: visibility.show_search,
            show_menu: visibility.show_menu,
            show_description: visibility.show_description,
            show_pagination: visibility.show_pagination,
            show_footer: visibility.show_footer,
            favicon: setup.favicon.map(String::from),
            menu_links: setup.menu_links.into_iter().map(MenuLinkDto::from).collect(),
        }
    }
}
