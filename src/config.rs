//! Fixed site constants and the tunable extraction settings.
//!
//! The constants describe FPL Mundo itself (its tagline, the section titles
//! that are never stories, the season tag) and are read-only for the whole
//! process. [`ExtractConfig`] holds the thresholds that can be overridden from
//! a YAML file.

use crate::error::ScrapeError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

/// Origin of every league page.
pub const SITE_BASE: &str = "https://www.fplmundo.com";

/// League code of the Premier mini-league. Any other code is Championship.
pub const DEFAULT_LEAGUE_CODE: &str = "723566";

/// League page scraped when no URL is given.
pub const DEFAULT_URL: &str = "https://www.fplmundo.com/723566";

/// Tag attached to every published review this season.
pub const SEASON_REVIEW_TAG: &str = "GW-Review-2025/26";

/// Section titles that look like stories but are navigation, legal or meta pages.
/// Compared against the uppercased, normalized title.
pub const TITLE_BLACKLIST: &[&str] = &[
    "MINI LEAGUE NEWS ROUNDUP",
    "PREMATCH EDITION",
    "POSTMATCH EDITION",
    "FANS, KITS AND STADIUMS",
    "FOLLOW FOR UPDATES",
    "NOT A REAL NEWSPAPER",
    "FPL MUNDO SUPPORTER LEAGUES",
    "LETTERS FROM READERS",
    "DISCLAIMER",
    "OTHER TERMS AND PRIVACY",
    "PRIVACY POLICY",
    "TERMS",
    "COOKIE POLICY",
    "WELCOME TO FPLMUNDO!",
];

/// The site's own tagline block.
pub static HOMEPAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)The original FPL mini-league newspaper").unwrap());

/// Thresholds for the extraction pipeline.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// quota: 3
/// min_body_chars: 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Maximum number of stories returned per document.
    pub quota: usize,
    /// Bodies shorter than this (in characters) are not stories.
    pub min_body_chars: usize,
    /// Body length cap applied when formatting commands.
    pub sanitize_limit: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            quota: 4,
            min_body_chars: 80,
            sanitize_limit: 6000,
        }
    }
}

impl ExtractConfig {
    /// Load settings from a YAML file, or the built-in defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid YAML, or sets `quota: 0`.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ScrapeError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).await?;
        let config: ExtractConfig = serde_yaml::from_str(&raw)?;
        if config.quota == 0 {
            return Err(ScrapeError::InvalidConfig(format!(
                "{path}: quota must be at least 1"
            )));
        }
        info!(
            quota = config.quota,
            min_body_chars = config.min_body_chars,
            "Loaded extraction config"
        );
        Ok(config)
    }
}
