// src/domain/slug/services.rs
use std::marker::PhantomData;
use std::sync::Arc;

use crate::application::ports::util::{SlugGenerator, SuffixGenerator};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::repository::{SlugCollection, SlugIndex};
use crate::domain::slug::value_objects::Slug;

/// Length of the random disambiguation suffix.
pub const SUFFIX_LEN: usize = 4;
const MAX_SUFFIX_ATTEMPTS: usize = 16;
/// Room left for `-` plus the suffix so it is never truncated.
const MAX_BASE_CHARS: usize = Slug::MAX_CHARS - SUFFIX_LEN - 1;

/// Domain service responsible for producing unique slugs within one collection.
pub struct SlugService<E: SlugCollection> {
    index: Arc<dyn SlugIndex<E>>,
    generator: Arc<dyn SlugGenerator>,
    suffixes: Arc<dyn SuffixGenerator>,
    _collection: PhantomData<fn() -> E>,
}

impl<E: SlugCollection> SlugService<E> {
    pub fn new(
        index: Arc<dyn SlugIndex<E>>,
        generator: Arc<dyn SlugGenerator>,
        suffixes: Arc<dyn SuffixGenerator>,
    ) -> Self {
        Self {
            index,
            generator,
            suffixes,
            _collection: PhantomData,
        }
    }

    /// Returns the slug a record should be saved with.
    ///
    /// An existing slug is kept untouched. Otherwise one is derived from
    /// `source`; if another record (anything but `own_id`) already owns it a
    /// random suffix is appended and the lookup repeated.
    pub async fn assign(
        &self,
        source: &str,
        current: Option<Slug>,
        own_id: Option<i64>,
    ) -> DomainResult<Slug> {
        if let Some(slug) = current {
            return Ok(slug);
        }

        let base = truncate_base(&self.generator.slugify(source));

        if !base.is_empty() {
            let candidate = Slug::new(base.clone())?;
            if !self.index.slug_taken(&candidate, own_id).await? {
                return Ok(candidate);
            }
            tracing::debug!(
                collection = E::COLLECTION,
                slug = %candidate,
                "slug already taken, appending suffix"
            );
        }

        for _ in 0..MAX_SUFFIX_ATTEMPTS {
            let suffix = self.suffixes.suffix(SUFFIX_LEN);
            let candidate = if base.is_empty() {
                Slug::new(suffix)?
            } else {
                Slug::new(format!("{base}-{suffix}"))?
            };
            if !self.index.slug_taken(&candidate, own_id).await? {
                return Ok(candidate);
            }
        }

        Err(DomainError::conflict(format!(
            "no free slug found for '{base}' in {}",
            E::COLLECTION
        )))
    }

    /// Slug for a record being updated. `None` keeps `current`, a blank
    /// request derives a fresh slug from `source`, anything else is used as given.
    pub async fn reassign(
        &self,
        source: &str,
        requested: Option<String>,
        current: &Slug,
        own_id: i64,
    ) -> DomainResult<Slug> {
        let kept = match requested {
            None => Some(current.clone()),
            Some(raw) => Slug::optional(Some(raw))?,
        };
        self.assign(source, kept, Some(own_id)).await
    }
}

fn truncate_base(base: &str) -> String {
    if base.chars().count() <= MAX_BASE_CHARS {
        return base.to_string();
    }
    let truncated: String = base.chars().take(MAX_BASE_CHARS).collect();
    truncated.trim_end_matches('-').to_string()
}
