use std::sync::Arc;

use crate::{
    application::{dto::SiteSetupDto, error::ApplicationResult},
    domain::site::SiteSetupRepository,
};

pub struct SiteQueryService {
    site_repo: Arc<dyn SiteSetupRepository>,
}

impl SiteQueryService {
    pub fn new(site_repo: Arc<dyn SiteSetupRepository>) -> Self {
        Self { site_repo }
    }

    /// `None` until an administrator saves the first setup.
    pub async fn get_setup(&self) -> ApplicationResult<Option<SiteSetupDto>> {
        Ok(self.site_repo.get().await?.map(Into::into))
    }
}
