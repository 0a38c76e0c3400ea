// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Source of the random `[a-z0-9]` tails appended to colliding slugs.
pub trait SuffixGenerator: Send + Sync {
    fn suffix(&self, len: usize) -> String;
}
