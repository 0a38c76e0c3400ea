use std::sync::Arc;

use crate::domain::{
    post::PostRepository,
    taxonomy::{CategoryRepository, TagRepository},
    user::UserRepository,
};

pub struct PostQueryService {
    pub(super) post_repo: Arc<dyn PostRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl PostQueryService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        tag_repo: Arc<dyn TagRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            post_repo,
            category_repo,
            tag_repo,
            user_repo,
        }
    }
}
