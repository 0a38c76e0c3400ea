use crate::domain::errors::DomainResult;
use crate::domain::site::entity::SiteSetup;
use async_trait::async_trait;

#[async_trait]
pub trait SiteSetupRepository: Send + Sync {
    async fn get(&self) -> DomainResult<Option<SiteSetup>>;
    /// Creates or replaces the setup together with its menu links.
    async fn save(&self, setup: SiteSetup) -> DomainResult<SiteSetup>;
}
