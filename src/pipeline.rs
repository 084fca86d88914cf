//! Extraction orchestrator.
//!
//! Strategies run as a priority cascade: a later strategy only fills the gap
//! left by earlier ones, and never reorders or replaces what they found.
//! Titles are deduplicated case-insensitively across the combined output.

use crate::config::ExtractConfig;
use crate::error::ScrapeError;
use crate::models::{CapturedPayload, RawDocument, Story};
use crate::outputs::command::{detect_gameweek, format_command, league_tag};
use crate::scrapers::{default_strategies, StoryFilter, StoryStrategy};
use crate::utils::{truncate_for_log, visible_text};
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Parse a captured page and extract up to `config.quota` stories.
pub fn extract(raw: &RawDocument, config: &ExtractConfig) -> Result<Vec<Story>, ScrapeError> {
    let document = Html::parse_document(&raw.markup);
    extract_from(&document, &raw.payloads, &default_strategies(), config)
}

/// Run `strategies` in order against an already parsed page.
///
/// Fails with [`ScrapeError::NoStoriesFound`] when every strategy comes back
/// empty. Fewer stories than the quota is not an error.
#[instrument(level = "info", skip_all, fields(payloads = payloads.len(), quota = config.quota))]
pub fn extract_from(
    document: &Html,
    payloads: &[CapturedPayload],
    strategies: &[Box<dyn StoryStrategy>],
    config: &ExtractConfig,
) -> Result<Vec<Story>, ScrapeError> {
    let filter = StoryFilter::from_config(config);
    let mut stories: Vec<Story> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for strategy in strategies {
        if stories.len() >= config.quota {
            break;
        }
        let seeds = strategy.extract(document, payloads, &filter);
        let before = stories.len();
        for seed in seeds {
            if stories.len() >= config.quota {
                break;
            }
            if seen.insert(seed.title_key()) {
                debug!(strategy = strategy.name(), title = %truncate_for_log(&seed.title, 80), "Accepted story");
                stories.push(Story::from(seed));
            }
        }
        info!(
            strategy = strategy.name(),
            added = stories.len() - before,
            total = stories.len(),
            "Strategy finished"
        );
    }

    if stories.is_empty() {
        warn!("No strategy produced a story");
        return Err(ScrapeError::NoStoriesFound);
    }
    Ok(stories)
}

/// Extract stories from one captured page and format them as publish commands.
///
/// The gameweek is detected once from the page text and the league tag once
/// from `url`; both are shared by every command.
#[instrument(level = "info", skip_all, fields(%url))]
pub fn scrape_document(
    raw: &RawDocument,
    url: &str,
    config: &ExtractConfig,
) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(&raw.markup);
    let gameweek = detect_gameweek(&visible_text(&document));
    let tag = league_tag(url);
    info!(gameweek = ?gameweek, league = tag, "Page context");

    let stories = extract_from(&document, &raw.payloads, &default_strategies(), config)?;
    Ok(stories
        .iter()
        .map(|story| format_command(gameweek.as_deref(), story, tag, config.sanitize_limit))
        .collect())
}
