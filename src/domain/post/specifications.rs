use std::collections::HashSet;

use crate::domain::post::entity::Post;
use crate::domain::user::value_objects::{Capability, UserId};

fn has_capability(capabilities: &HashSet<Capability>, resource: &str, action: &str) -> bool {
    capabilities.iter().any(|cap| cap.matches(resource, action))
}

pub struct CanUpdatePostSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    post: &'a Post,
    user_id: UserId,
}

impl<'a> CanUpdatePostSpec<'a> {
    pub fn new(capabilities: &'a HashSet<Capability>, post: &'a Post, user_id: UserId) -> Self {
        Self {
            capabilities,
            post,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "posts", "update:any")
            || (has_capability(self.capabilities, "posts", "update:own")
                && self.post.is_authored_by(self.user_id))
    }
}

pub struct CanDeletePostSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    post: &'a Post,
    user_id: UserId,
}

impl<'a> CanDeletePostSpec<'a> {
    pub fn new(capabilities: &'a HashSet<Capability>, post: &'a Post, user_id: UserId) -> Self {
        Self {
            capabilities,
            post,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "posts", "delete:any")
            || (has_capability(self.capabilities, "posts", "delete:own")
                && self.post.is_authored_by(self.user_id))
    }
}

/// Published posts are public; drafts are visible to their author only.
pub struct CanViewPostSpec<'a> {
    post: &'a Post,
    viewer: Option<UserId>,
}

impl<'a> CanViewPostSpec<'a> {
    pub fn new(post: &'a Post, viewer: Option<UserId>) -> Self {
        Self { post, viewer }
    }

    pub fn is_satisfied(&self) -> bool {
        self.post.is_published
            || self
                .viewer
                .is_some_and(|viewer| self.post.is_authored_by(viewer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::entity::tests::sample_post;
    use crate::domain::user::Role;

    #[test]
    fn author_updates_only_own_posts() {
        let caps = Role::Author.default_capabilities();
        let post = sample_post(true, 1);
        assert!(CanUpdatePostSpec::new(&caps, &post, UserId(1)).is_satisfied());
        assert!(!CanUpdatePostSpec::new(&caps, &post, UserId(2)).is_satisfied());
        assert!(!CanDeletePostSpec::new(&caps, &post, UserId(2)).is_satisfied());
    }

    #[test]
    fn admin_updates_any_post() {
        let caps = Role::Admin.default_capabilities();
        let post = sample_post(true, 1);
        assert!(CanUpdatePostSpec::new(&caps, &post, UserId(9)).is_satisfied());
        assert!(CanDeletePostSpec::new(&caps, &post, UserId(9)).is_satisfied());
    }

    #[test]
    fn drafts_are_hidden_from_everyone_but_their_author() {
        let draft = sample_post(false, 1);
        assert!(!CanViewPostSpec::new(&draft, None).is_satisfied());
        assert!(!CanViewPostSpec::new(&draft, Some(UserId(2))).is_satisfied());
        assert!(CanViewPostSpec::new(&draft, Some(UserId(1))).is_satisfied());
        assert!(CanViewPostSpec::new(&sample_post(true, 1), None).is_satisfied());
    }
}
