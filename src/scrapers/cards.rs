//! Card extractor: stories rendered inside a recognizable container.
//!
//! Elementor post grids are the common case on FPL Mundo. The selector list
//! walks from those specific patterns down to generic `section`/`div`
//! containers, so one element may be picked up more than once; the final
//! title dedup drops the repeats.

use super::{StoryFilter, StoryStrategy};
use crate::models::{CapturedPayload, StorySeed};
use crate::utils::{dedup_by_title, element_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Container selectors, most specific first.
const CARD_SELECTORS: &[&str] = &[
    ".elementor-post__card",
    "article.elementor-post",
    ".elementor-grid .elementor-grid-item",
    "article.post",
    ".story, .story-card, .card",
    "main section, main article, main div",
    "section, div.elementor-widget-container",
];

static CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
    CARD_SELECTORS
        .iter()
        .map(|sel| Selector::parse(sel).unwrap())
        .collect()
});
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, .elementor-post__title").unwrap());
static BOOKMARK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[rel='bookmark']").unwrap());
static BODY_BLOCKS: Lazy<Selector> = Lazy::new(|| Selector::parse("p, li").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct CardStrategy;

impl StoryStrategy for CardStrategy {
    fn name(&self) -> &'static str {
        "cards"
    }

    fn extract(
        &self,
        document: &Html,
        _payloads: &[CapturedPayload],
        filter: &StoryFilter,
    ) -> Vec<StorySeed> {
        extract_cards(document, filter)
    }
}

/// Find story cards in the page.
///
/// Candidates from every selector are pooled in encounter order. For each
/// one the title is the first heading (or the first bookmark link), the body
/// is every non-empty paragraph and list item, and the image is the first
/// `img` descendant's `src`.
#[instrument(level = "debug", skip_all)]
pub fn extract_cards(document: &Html, filter: &StoryFilter) -> Vec<StorySeed> {
    let candidates: Vec<ElementRef<'_>> = CONTAINERS
        .iter()
        .flat_map(|selector| document.select(selector))
        .collect();
    debug!(candidates = candidates.len(), "Collected card candidates");

    let seeds = candidates
        .into_iter()
        .filter_map(|card| card_seed(card, filter))
        .collect::<Vec<_>>();

    let seeds = dedup_by_title(seeds);
    debug!(count = seeds.len(), "Extracted card stories");
    seeds
}

fn card_seed(card: ElementRef<'_>, filter: &StoryFilter) -> Option<StorySeed> {
    let title = card
        .select(&TITLE)
        .next()
        .or_else(|| card.select(&BOOKMARK).next())
        .map(element_text)
        .unwrap_or_default();

    let body = card
        .select(&BODY_BLOCKS)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let image_url = card
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string);

    filter.seed(&title, &body, image_url)
}
