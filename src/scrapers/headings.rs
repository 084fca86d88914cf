//! Heading segmenter: stories laid out as a heading followed by loose
//! paragraphs, with no enclosing container.
//!
//! The page body is flattened into one depth-first node sequence. Every
//! `h1`-`h4` element starts a segment that runs until the next heading in
//! that sequence. Heading positions are computed once and each heading's end
//! is found by binary search, so the whole pass stays linear in page size.

use super::{StoryFilter, StoryStrategy};
use crate::models::{CapturedPayload, StorySeed};
use crate::utils::{dedup_by_title, element_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use tracing::{debug, instrument};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static HEADINGS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("main h1, main h2, main h3, main h4, h1, h2, h3, h4").unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingStrategy;

impl StoryStrategy for HeadingStrategy {
    fn name(&self) -> &'static str {
        "headings"
    }

    fn extract(
        &self,
        document: &Html,
        _payloads: &[CapturedPayload],
        filter: &StoryFilter,
    ) -> Vec<StorySeed> {
        extract_headings(document, filter)
    }
}

fn is_heading(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| matches!(el.name(), "h1" | "h2" | "h3" | "h4"))
}

/// Split the page at its headings and turn each segment into a seed.
///
/// Body text is every non-empty paragraph and list item inside the segment;
/// the image is the first `img` in the segment that carries a `src`.
#[instrument(level = "debug", skip_all)]
pub fn extract_headings(document: &Html, filter: &StoryFilter) -> Vec<StorySeed> {
    let root = document
        .select(&BODY)
        .next()
        .map(|body| *body)
        .unwrap_or_else(|| document.tree.root());

    let nodes: Vec<_> = root.descendants().collect();
    let positions: HashMap<_, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id(), i))
        .collect();
    let boundaries: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| is_heading(node.value()))
        .map(|(i, _)| i)
        .collect();
    debug!(
        nodes = nodes.len(),
        headings = boundaries.len(),
        "Flattened document"
    );

    let mut seeds = Vec::new();
    for heading in document.select(&HEADINGS) {
        let Some(&start) = positions.get(&heading.id()) else {
            continue;
        };
        let next = boundaries.partition_point(|&b| b <= start);
        let end = boundaries.get(next).copied().unwrap_or(nodes.len());

        let mut parts = Vec::new();
        let mut image_url = None;
        for node in &nodes[start + 1..end] {
            let Some(el) = ElementRef::wrap(*node) else {
                continue;
            };
            match el.value().name() {
                "p" | "li" => {
                    let text = element_text(el);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
                "img" if image_url.is_none() => {
                    image_url = el
                        .value()
                        .attr("src")
                        .filter(|src| !src.is_empty())
                        .map(str::to_string);
                }
                _ => {}
            }
        }

        let title = element_text(heading);
        if let Some(seed) = filter.seed(&title, &parts.join(" "), image_url) {
            seeds.push(seed);
        }
    }

    let seeds = dedup_by_title(seeds);
    debug!(count = seeds.len(), "Extracted heading stories");
    seeds
}
