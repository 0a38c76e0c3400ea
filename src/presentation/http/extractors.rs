// src/presentation/http/extractors.rs
use crate::{
    application::{
        dto::{AuthenticatedUser, SiteSetupDto},
        error::ApplicationError,
    },
    presentation::http::state::HttpState,
};
use axum::{Extension, extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

/// The site setup for the current request, `None` until one is saved.
#[derive(Debug, Clone)]
pub struct SiteContext(pub Option<SiteSetupDto>);

async fn app_state(parts: &mut Parts) -> Result<HttpState, HttpError> {
    let Extension(state) = Extension::<HttpState>::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            HttpError::from_error(ApplicationError::infrastructure(
                "application state missing",
            ))
        })?;
    Ok(state)
}

async fn authenticate(state: &HttpState, token: &str) -> Result<AuthenticatedUser, HttpError> {
    state
        .services
        .token_manager()
        .authenticate(token)
        .await
        .map_err(HttpError::from_error)
}

impl FromRequestParts<()> for Authenticated {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        // Set by the capability middleware when it already checked the token.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(Self(user.clone()));
        }

        let app_state = app_state(parts).await?;
        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "missing Authorization header",
                ))
            })?;

        authenticate(&app_state, header.token()).await.map(Self)
    }
}

impl FromRequestParts<()> for MaybeAuthenticated {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts).await?;

        match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(header) => Ok(Self(Some(authenticate(&app_state, header.token()).await?))),
            None => Ok(Self(None)),
        }
    }
}

impl FromRequestParts<()> for SiteContext {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts).await?;
        let setup = app_state
            .services
            .site_queries
            .get_setup()
            .await
            .map_err(HttpError::from_error)?;
        Ok(Self(setup))
    }
}
