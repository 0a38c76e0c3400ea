// src/application/services/mod.rs
pub mod images;

use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            capability::ensure_capability, media::MediaCommandService, pages::PageCommandService,
            posts::PostCommandService, site::SiteCommandService,
            taxonomy::TaxonomyCommandService, users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            media::{EncodeOptions, ImageCodec, MediaStorage},
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::{SlugGenerator, SuffixGenerator},
        },
        queries::{
            pages::PageQueryService, posts::PostQueryService, site::SiteQueryService,
            taxonomy::TaxonomyQueryService, users::UserQueryService,
        },
    },
    domain::{
        media::TargetWidth,
        page::{Page, PageRepository},
        post::{Post, PostRepository},
        site::SiteSetupRepository,
        slug::{SlugCollection, SlugIndex, SlugService},
        taxonomy::{Category, CategoryRepository, Tag, TagRepository},
        user::UserRepository,
    },
};

use images::ImageNormalizer;

/// Image handling parameters, usually taken from `MediaConfig`.
#[derive(Debug, Clone, Copy)]
pub struct ImageSettings {
    pub post_cover_width: TargetWidth,
    pub favicon_width: TargetWidth,
    pub encode: EncodeOptions,
    pub max_upload_bytes: usize,
}

/// Everything the application layer needs from the outside world.
pub struct ApplicationDependencies {
    pub user_repo: Arc<dyn UserRepository>,
    pub post_repo: Arc<dyn PostRepository>,
    pub page_repo: Arc<dyn PageRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub tag_repo: Arc<dyn TagRepository>,
    pub site_repo: Arc<dyn SiteSetupRepository>,
    pub post_slugs: Arc<dyn SlugIndex<Post>>,
    pub page_slugs: Arc<dyn SlugIndex<Page>>,
    pub category_slugs: Arc<dyn SlugIndex<Category>>,
    pub tag_slugs: Arc<dyn SlugIndex<Tag>>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub suffixes: Arc<dyn SuffixGenerator>,
    pub media_storage: Arc<dyn MediaStorage>,
    pub image_codec: Arc<dyn ImageCodec>,
    pub images: ImageSettings,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub page_commands: Arc<PageCommandService>,
    pub page_queries: Arc<PageQueryService>,
    pub taxonomy_commands: Arc<TaxonomyCommandService>,
    pub taxonomy_queries: Arc<TaxonomyQueryService>,
    pub site_commands: Arc<SiteCommandService>,
    pub site_queries: Arc<SiteQueryService>,
    pub media_commands: Arc<MediaCommandService>,
    token_manager: Arc<dyn TokenManager>,
}

fn slug_service<E: SlugCollection>(
    index: &Arc<dyn SlugIndex<E>>,
    deps: &ApplicationDependencies,
) -> Arc<SlugService<E>> {
    Arc::new(SlugService::new(
        Arc::clone(index),
        Arc::clone(&deps.slugger),
        Arc::clone(&deps.suffixes),
    ))
}

impl ApplicationServices {
    pub fn new(deps: ApplicationDependencies) -> Self {
        let normalizer = Arc::new(ImageNormalizer::new(
            Arc::clone(&deps.media_storage),
            Arc::clone(&deps.image_codec),
            deps.images.encode,
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.password_hasher),
            Arc::clone(&deps.token_manager),
            Arc::clone(&deps.clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.clock),
        ));

        let taxonomy_commands = Arc::new(TaxonomyCommandService::new(
            Arc::clone(&deps.category_repo),
            Arc::clone(&deps.tag_repo),
            slug_service(&deps.category_slugs, &deps),
            slug_service(&deps.tag_slugs, &deps),
        ));
        let taxonomy_queries = Arc::new(TaxonomyQueryService::new(
            Arc::clone(&deps.category_repo),
            Arc::clone(&deps.tag_repo),
        ));

        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&deps.post_repo),
            Arc::clone(&deps.category_repo),
            Arc::clone(&taxonomy_commands),
            slug_service(&deps.post_slugs, &deps),
            Arc::clone(&normalizer),
            deps.images.post_cover_width,
            Arc::clone(&deps.clock),
        ));
        let post_queries = Arc::new(PostQueryService::new(
            Arc::clone(&deps.post_repo),
            Arc::clone(&deps.category_repo),
            Arc::clone(&deps.tag_repo),
            Arc::clone(&deps.user_repo),
        ));

        let page_commands = Arc::new(PageCommandService::new(
            Arc::clone(&deps.page_repo),
            slug_service(&deps.page_slugs, &deps),
            Arc::clone(&deps.clock),
        ));
        let page_queries = Arc::new(PageQueryService::new(Arc::clone(&deps.page_repo)));

        let site_commands = Arc::new(SiteCommandService::new(
            Arc::clone(&deps.site_repo),
            Arc::clone(&normalizer),
            deps.images.favicon_width,
        ));
        let site_queries = Arc::new(SiteQueryService::new(Arc::clone(&deps.site_repo)));

        let media_commands = Arc::new(MediaCommandService::new(
            Arc::clone(&deps.media_storage),
            Arc::clone(&deps.image_codec),
            Arc::clone(&deps.clock),
            deps.images.max_upload_bytes,
        ));

        Self {
            user_commands,
            user_queries,
            post_commands,
            post_queries,
            page_commands,
            page_queries,
            taxonomy_commands,
            taxonomy_queries,
            site_commands,
            site_queries,
            media_commands,
            token_manager: deps.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Authenticate a raw bearer token and ensure the subject has the
    /// specified capability.
    pub async fn authenticate_and_authorize(
        &self,
        token: &str,
        resource: &str,
        action: &str,
    ) -> ApplicationResult<AuthenticatedUser> {
        let user = self.token_manager.authenticate(token).await?;
        ensure_capability(&user, resource, action)?;
        Ok(user)
    }
}
