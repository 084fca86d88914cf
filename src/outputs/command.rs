//! Publish command formatting and the page-level context it needs.
//!
//! A command is a single line:
//!
//! ```text
//! /publish_news title: GW7 Review: <title> content: <body> tags: Premier, GW-Review-2025/26 excerpt: <body> image_url: <url>
//! ```

use crate::config::{DEFAULT_LEAGUE_CODE, SEASON_REVIEW_TAG};
use crate::models::Story;
use crate::utils::sanitize;
use once_cell::sync::Lazy;
use regex::Regex;

static GW_SHORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bGW\s*([0-9]{1,2})\b").unwrap());
static GW_LONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bGameweek\s*([0-9]{1,2})\b").unwrap());

/// Find the gameweek number in the page's visible text.
///
/// `GW<n>` is preferred; `Gameweek <n>` is only tried when no abbreviation
/// appears anywhere on the page.
pub fn detect_gameweek(page_text: &str) -> Option<String> {
    GW_SHORT
        .captures(page_text)
        .or_else(|| GW_LONG.captures(page_text))
        .map(|caps| caps[1].to_string())
}

/// `"Premier"` for the Premier mini-league URL, `"Championship"` for anything else.
pub fn league_tag(url: &str) -> &'static str {
    if url.contains(DEFAULT_LEAGUE_CODE) {
        "Premier"
    } else {
        "Championship"
    }
}

/// Title of the published review post.
///
/// # Returns
///
/// `"GW<n> Review: <title>"` when a gameweek was detected, otherwise
/// `"Review: <title>"`.
pub fn review_title(gameweek: Option<&str>, title: &str) -> String {
    match gameweek {
        Some(gw) => format!("GW{gw} Review: {title}").trim().to_string(),
        None => format!("Review: {title}"),
    }
}

/// Format one story as a publish command.
///
/// # Arguments
///
/// * `gameweek` - Gameweek detected on the page, if any
/// * `story` - The story to publish
/// * `league_tag` - `"Premier"` or `"Championship"`
/// * `limit` - Body length cap; the capped body is used for both `content` and `excerpt`
pub fn format_command(gameweek: Option<&str>, story: &Story, league_tag: &str, limit: usize) -> String {
    let title = review_title(gameweek, &story.title);
    let body = sanitize(&story.body, limit);
    let image = story.image_url.as_deref().unwrap_or("");
    format!(
        "/publish_news title: {title} content: {body} tags: {league_tag}, {SEASON_REVIEW_TAG} excerpt: {body} image_url: {image}"
    )
}
