//! Story extraction strategies.
//!
//! Each strategy reads one captured page and produces [`StorySeed`]s on its own.
//! The orchestrator in [`crate::pipeline`] runs them in priority order:
//!
//! | Strategy | Module | Reads | Finds |
//! |----------|--------|-------|-------|
//! | Cards | [`cards`] | markup | story containers matched by structural selectors |
//! | Headings | [`headings`] | markup | content between consecutive `h1`-`h4` elements |
//! | JSON | [`json_miner`] | captured payloads | objects with title-like and body-like keys |
//!
//! All three apply the same [`StoryFilter`] before emitting a seed, and each
//! deduplicates its own output by case-insensitive title.

pub mod cards;
pub mod headings;
pub mod json_miner;

use crate::config::{ExtractConfig, HOMEPAGE_MARKER, TITLE_BLACKLIST};
use crate::models::{CapturedPayload, StorySeed};
use crate::utils::normalize;
use scraper::Html;

/// The shared rules a candidate must pass to become a [`StorySeed`].
#[derive(Debug, Clone)]
pub struct StoryFilter {
    min_body_chars: usize,
}

impl StoryFilter {
    /// Filter with the fixed blacklist and homepage marker, rejecting bodies
    /// shorter than `min_body_chars` characters.
    pub fn new(min_body_chars: usize) -> Self {
        Self { min_body_chars }
    }

    /// Filter using the body threshold from an [`ExtractConfig`].
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(config.min_body_chars)
    }

    /// Check an already normalized title and body.
    pub fn accepts(&self, title: &str, body: &str) -> bool {
        if title.is_empty() {
            return false;
        }
        let upper = title.to_uppercase();
        if TITLE_BLACKLIST.iter().any(|entry| *entry == upper) {
            return false;
        }
        if body.chars().count() < self.min_body_chars {
            return false;
        }
        !HOMEPAGE_MARKER.is_match(&format!("{title} {body}"))
    }

    /// Normalize a raw candidate and turn it into a seed if it passes.
    pub fn seed(&self, title: &str, body: &str, image_url: Option<String>) -> Option<StorySeed> {
        let title = normalize(title);
        let body = normalize(body);
        self.accepts(&title, &body).then(|| StorySeed {
            title,
            body,
            image_url,
        })
    }
}

impl Default for StoryFilter {
    fn default() -> Self {
        Self::from_config(&ExtractConfig::default())
    }
}

/// One extraction heuristic in the cascade.
pub trait StoryStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Seeds found in the page, deduplicated by title, in document order.
    fn extract(
        &self,
        document: &Html,
        payloads: &[CapturedPayload],
        filter: &StoryFilter,
    ) -> Vec<StorySeed>;
}

/// Strategies in priority order: cards, then headings, then JSON payloads.
pub fn default_strategies() -> Vec<Box<dyn StoryStrategy>> {
    vec![
        Box::new(cards::CardStrategy),
        Box::new(headings::HeadingStrategy),
        Box::new(json_miner::JsonStrategy),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn test_rejects_empty_title() {
        assert!(!StoryFilter::default().accepts("", &body(200)));
    }

    #[test]
    fn test_rejects_blacklisted_title_any_case() {
        let filter = StoryFilter::default();
        assert!(!filter.accepts("Disclaimer", &body(200)));
        assert!(!filter.accepts("privacy policy", &body(200)));
        assert!(!filter.accepts("Welcome to FPLMundo!", &body(200)));
        assert!(filter.accepts("Disclaimer Row Erupts", &body(200)));
    }

    #[test]
    fn test_body_length_boundary() {
        let filter = StoryFilter::default();
        assert!(!filter.accepts("Title", &body(79)));
        assert!(filter.accepts("Title", &body(80)));
    }

    #[test]
    fn test_min_body_is_configurable() {
        let filter = StoryFilter::new(10);
        assert!(filter.accepts("Title", &body(10)));
        assert!(!filter.accepts("Title", &body(9)));
    }

    #[test]
    fn test_rejects_homepage_marker() {
        let filter = StoryFilter::default();
        let tagline = format!("The original FPL mini-league newspaper. {}", body(100));
        assert!(!filter.accepts("Welcome", &tagline));
        assert!(!filter.accepts("The Original FPL Mini-League Newspaper", &body(100)));
    }

    #[test]
    fn test_seed_normalizes() {
        let seed = StoryFilter::default()
            .seed("  Big &amp; Bold  ", &format!(" {} ", body(90)), None)
            .unwrap();
        assert_eq!(seed.title, "Big & Bold");
        assert_eq!(seed.body.len(), 90);
    }

    #[test]
    fn test_default_strategy_order() {
        let names: Vec<_> = default_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["cards", "headings", "json"]);
    }
}
