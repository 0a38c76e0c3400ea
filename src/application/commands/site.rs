// src/application/commands/site.rs
use std::sync::Arc;

use super::capability::ensure_capability;
use crate::{
    application::{
        dto::{AuthenticatedUser, SiteSetupDto},
        error::{ApplicationError, ApplicationResult},
        services::images::ImageNormalizer,
    },
    domain::{
        media::{ImageRef, TargetWidth},
        site::{
            LinkTarget, MenuLink, MenuText, SiteDescription, SiteSetup, SiteSetupRepository,
            SiteTitle, SiteVisibility,
        },
    },
};

pub struct MenuLinkInput {
    pub text: String,
    pub url_or_path: String,
    pub new_tab: bool,
}

/// Replaces the whole setup. Visibility flags left out keep their default
/// of `true`.
#[derive(Default)]
pub struct SaveSiteSetupCommand {
    pub title: String,
    pub description: String,
    pub show_header: Option<bool>,
    pub show_search: Option<bool>,
    pub show_menu: Option<bool>,
    pub show_description: Option<bool>,
    pub show_pagination: Option<bool>,
    pub show_footer: Option<bool>,
    pub favicon: Option<String>,
    pub menu_links: Vec<MenuLinkInput>,
}

pub struct SiteCommandService {
    site_repo: Arc<dyn SiteSetupRepository>,
    images: Arc<ImageNormalizer>,
    favicon_width: TargetWidth,
}

impl SiteCommandService {
    pub fn new(
        site_repo: Arc<dyn SiteSetupRepository>,
        images: Arc<ImageNormalizer>,
        favicon_width: TargetWidth,
    ) -> Self {
        Self {
            site_repo,
            images,
            favicon_width,
        }
    }

    pub async fn save_setup(
        &self,
        actor: &AuthenticatedUser,
        command: SaveSiteSetupCommand,
    ) -> ApplicationResult<SiteSetupDto> {
        ensure_capability(actor, "site", "manage")?;

        let setup = build_setup(command)?;
        let previous_favicon = self
            .site_repo
            .get()
            .await?
            .and_then(|existing| existing.favicon);

        let saved = self.site_repo.save(setup).await?;
        tracing::info!(title = %saved.title, links = saved.menu_links.len(), "site setup saved");

        self.images
            .normalize_on_save(
                previous_favicon.as_ref(),
                saved.favicon.as_ref(),
                self.favicon_width,
            )
            .await;

        Ok(saved.into())
    }
}

fn build_setup(command: SaveSiteSetupCommand) -> ApplicationResult<SiteSetup> {
    let defaults = SiteVisibility::default();
    let visibility = SiteVisibility {
        show_header: command.show_header.unwrap_or(defaults.show_header),
        show_search: command.show_search.unwrap_or(defaults.show_search),
        show_menu: command.show_menu.unwrap_or(defaults.show_menu),
        show_description: command.show_description.unwrap_or(defaults.show_description),
        show_pagination: command.show_pagination.unwrap_or(defaults.show_pagination),
        show_footer: command.show_footer.unwrap_or(defaults.show_footer),
    };

    let favicon = ImageRef::optional(command.favicon)?;
    if let Some(favicon) = &favicon {
        let is_png = favicon
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(ApplicationError::validation("favicon must be a PNG image"));
        }
    }

    let menu_links = command
        .menu_links
        .into_iter()
        .map(|link| {
            Ok(MenuLink {
                text: MenuText::new(link.text)?,
                url_or_path: LinkTarget::new(link.url_or_path)?,
                new_tab: link.new_tab,
            })
        })
        .collect::<ApplicationResult<Vec<_>>>()?;

    Ok(SiteSetup {
        title: SiteTitle::new(command.title)?,
        description: SiteDescription::new(command.description)?,
        visibility,
        favicon,
        menu_links,
    })
}
