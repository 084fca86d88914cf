//! Text normalization and small helpers shared by the extraction strategies.
//!
//! - [`normalize`] and [`sanitize`] are applied at every text boundary before a
//!   value lands in a story or a command line
//! - [`element_text`] and [`visible_text`] flatten parsed markup into text
//! - [`dedup_by_title`] is the stable, case-insensitive title dedup
//! - [`ensure_writable_dir`] validates output directories

use crate::models::StorySeed;
use html_escape::decode_html_entities;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Decode HTML entities, turn non-breaking and zero-width spaces into plain
/// spaces, collapse whitespace runs and trim.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  Fish &amp;\u{00a0}chips \n"), "Fish & chips");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let decoded = decode_html_entities(text);
    let spaced = decoded.replace(|c: char| c == '\u{00a0}' || c == '\u{200b}', " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// [`normalize`], then cap the result at `limit` characters. A truncated
/// value gets a single `…` appended.
pub fn sanitize(text: &str, limit: usize) -> String {
    let cleaned = normalize(text);
    if cleaned.chars().count() <= limit {
        cleaned
    } else {
        let mut cut: String = cleaned.chars().take(limit).collect();
        cut.push('…');
        cut
    }
}

/// Normalized text of an element: its trimmed text nodes joined by a space.
pub fn element_text(element: ElementRef<'_>) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ");
    normalize(&joined)
}

/// Normalized text of the whole page, skipping script and style contents.
pub fn visible_text(document: &Html) -> String {
    let joined = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|el| matches!(el.name(), "script" | "style" | "template"));
            let text = text.trim();
            (!hidden && !text.is_empty()).then_some(text)
        })
        .join(" ");
    normalize(&joined)
}

/// Keep the first seed for every case-insensitive title, preserving order.
pub fn dedup_by_title(seeds: Vec<StorySeed>) -> Vec<StorySeed> {
    seeds.into_iter().unique_by(StorySeed::title_key).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of dropped characters appended.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", head, total - max)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> std::io::Result<()> {
    fs::create_dir_all(path).await?;
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn seed(title: &str) -> StorySeed {
        StorySeed {
            title: title.to_string(),
            body: format!("body of {title}"),
            image_url: None,
        }
    }

    #[test]
    fn test_normalize_entities_and_spaces() {
        assert_eq!(normalize("Fish &amp; chips"), "Fish & chips");
        assert_eq!(normalize("a\u{00a0}b\u{200b}c"), "a b c");
        assert_eq!(normalize("  lots \n\t of   space  "), "lots of space");
        assert_eq!(normalize("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
    }

    #[test]
    fn test_sanitize_within_limit() {
        assert_eq!(sanitize("  short text ", 6000), "short text");
    }

    #[test]
    fn test_sanitize_truncates_with_ellipsis() {
        let long = "é".repeat(20);
        let out = sanitize(&long, 10);
        assert_eq!(out.chars().count(), 11);
        assert!(out.ends_with('…'));
        assert!(out.starts_with(&"é".repeat(10)));
    }

    #[test]
    fn test_element_text_joins_nodes() {
        let html = Html::parse_fragment("<p>Hello <b>big</b>\n   world&nbsp;!</p>");
        let sel = Selector::parse("p").unwrap();
        let p = html.select(&sel).next().unwrap();
        assert_eq!(element_text(p), "Hello big world !");
    }

    #[test]
    fn test_visible_text_skips_scripts() {
        let html = Html::parse_document(
            "<html><head><script>var gw = 'GW99';</script></head>\
             <body><h1>Gameweek 7</h1><p>Recap</p></body></html>",
        );
        assert_eq!(visible_text(&html), "Gameweek 7 Recap");
    }

    #[test]
    fn test_dedup_keeps_first() {
        let seeds = vec![seed("Alpha"), seed("ALPHA"), seed("Beta"), seed("alpha")];
        let out = dedup_by_title(seeds);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Alpha");
        assert_eq!(out[1].title, "Beta");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let seeds = vec![seed("One"), seed("Two"), seed("one"), seed("Three"), seed("TWO")];
        let once = dedup_by_title(seeds);
        let twice = dedup_by_title(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
        let result = truncate_for_log(&"a".repeat(500), 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 chars)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        ensure_writable_dir(nested.to_str().unwrap()).await.unwrap();
        assert!(nested.is_dir());
    }
}
