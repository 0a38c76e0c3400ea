use std::sync::Arc;

use crate::application::{
    commands::taxonomy::TaxonomyCommandService, ports::time::Clock,
    services::images::ImageNormalizer,
};
use crate::domain::{
    media::TargetWidth,
    post::{Post, PostRepository},
    slug::SlugService,
    taxonomy::CategoryRepository,
};

pub struct PostCommandService {
    pub(super) post_repo: Arc<dyn PostRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) taxonomy: Arc<TaxonomyCommandService>,
    pub(super) slugs: Arc<SlugService<Post>>,
    pub(super) images: Arc<ImageNormalizer>,
    pub(super) cover_width: TargetWidth,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        taxonomy: Arc<TaxonomyCommandService>,
        slugs: Arc<SlugService<Post>>,
        images: Arc<ImageNormalizer>,
        cover_width: TargetWidth,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            post_repo,
            category_repo,
            taxonomy,
            slugs,
            images,
            cover_width,
            clock,
        }
    }
}
