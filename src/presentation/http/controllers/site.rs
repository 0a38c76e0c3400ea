// src/presentation/http/controllers/site.rs
use crate::application::{
    commands::site::{MenuLinkInput, SaveSiteSetupCommand},
    dto::SiteSetupDto,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, SiteContext};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuLinkRequest {
    pub text: String,
    pub url_or_path: String,
    #[serde(default)]
    pub new_tab: bool,
}

/// Visibility flags that are left out default to `true`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveSiteRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub show_header: Option<bool>,
    pub show_search: Option<bool>,
    pub show_menu: Option<bool>,
    pub show_description: Option<bool>,
    pub show_pagination: Option<bool>,
    pub show_footer: Option<bool>,
    pub favicon: Option<String>,
    #[serde(default)]
    pub menu_links: Vec<MenuLinkRequest>,
}

#[utoipa::path(
    get,
    path = "/api/v1/site",
    responses(
        (status = 200, description = "Site setup, or null before the first save.", body = SiteSetupDto)
    ),
    security(()),
    tag = "Site"
)]
pub async fn get_site(SiteContext(site): SiteContext) -> Json<Option<SiteSetupDto>> {
    Json(site)
}

#[utoipa::path(
    put,
    path = "/api/v1/site",
    request_body = SaveSiteRequest,
    responses(
        (status = 200, description = "Saved site setup.", body = SiteSetupDto),
        (status = 400, description = "Invalid field.", body = ErrorResponse),
        (status = 403, description = "Requires site:manage.", body = ErrorResponse)
    ),
    tag = "Site"
)]
pub async fn save_site(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<SaveSiteRequest>,
) -> HttpResult<Json<SiteSetupDto>> {
    let command = SaveSiteSetupCommand {
        title: payload.title,
        description: payload.description,
        show_header: payload.show_header,
        show_search: payload.show_search,
        show_menu: payload.show_menu,
        show_description: payload.show_description,
        show_pagination: payload.show_pagination,
        show_footer: payload.show_footer,
        favicon: payload.favicon,
        menu_links: payload
            .menu_links
            .into_iter()
            .map(|link| MenuLinkInput {
                text: link.text,
                url_or_path: link.url_or_path,
                new_tab: link.new_tab,
            })
            .collect(),
    };

    state
        .services
        .site_commands
        .save_setup(&user, command)
        .await
        .into_http()
        .map(Json)
}
