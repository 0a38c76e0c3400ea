// src/infrastructure/util.rs
use crate::application::ports::util::{SlugGenerator, SuffixGenerator};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s-]").unwrap_or_else(|err| panic!("invalid slug regex: {err}"))
});
static SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s_-]+").unwrap_or_else(|err| panic!("invalid slug regex: {err}"))
});

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercases, drops punctuation and joins words with single hyphens.
/// Letters outside ASCII are kept as they are, except uppercase letters that
/// have no lowercase form (`🄰`), which are dropped like punctuation.
#[derive(Default, Clone)]
pub struct WordSlugGenerator;

impl SlugGenerator for WordSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        let lowered: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_uppercase())
            .collect();
        let stripped = DISALLOWED.replace_all(&lowered, "");
        SEPARATORS
            .replace_all(&stripped, "-")
            .trim_matches('-')
            .to_string()
    }
}

#[derive(Default, Clone)]
pub struct RandomSuffixGenerator;

impl SuffixGenerator for RandomSuffixGenerator {
    fn suffix(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| char::from(SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())]))
            .collect()
    }
}
