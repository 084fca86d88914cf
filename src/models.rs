//! Data models for captured pages and the stories extracted from them.
//!
//! - [`RawDocument`]: rendered markup plus JSON payloads seen during page load
//! - [`StorySeed`]: a candidate produced by one extraction strategy
//! - [`Story`]: a seed accepted into the final, globally deduplicated list
//! - [`ScrapeReport`]: the merged command lines written as JSON

use serde::{Deserialize, Serialize};

/// A JSON response observed while the page loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPayload {
    /// URL the response came from.
    pub source_url: String,
    /// The parsed response body.
    pub json: serde_json::Value,
}

/// One captured page: the fully rendered markup and its background payloads,
/// in capture order.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub markup: String,
    pub payloads: Vec<CapturedPayload>,
}

impl RawDocument {
    /// A page with no captured payloads, as a static fetch produces.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            payloads: Vec::new(),
        }
    }
}

/// A candidate story. Title and body are already normalized and have passed
/// the shared filter rules of the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySeed {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl StorySeed {
    /// Key used for title deduplication.
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }
}

/// A story in the final output list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl From<StorySeed> for Story {
    fn from(seed: StorySeed) -> Self {
        Self {
            title: seed.title,
            body: seed.body,
            image_url: seed.image_url,
        }
    }
}

/// Merged publish commands for one league, as printed with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Lowercased league tag: `"premier"` or `"championship"`.
    pub source: String,
    pub commands: Vec<String>,
}
