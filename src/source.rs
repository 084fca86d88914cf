//! Page acquisition.
//!
//! Browser automation and consent handling live outside this crate; what
//! arrives here is a [`RawDocument`]. Two sources are provided:
//!
//! - [`DumpSource`]: markup and payloads saved by a previous `--dump` or by an
//!   external browser session
//! - [`HttpSource`]: a plain GET of the league page, markup only

use crate::config::{DEFAULT_LEAGUE_CODE, SITE_BASE};
use crate::error::ScrapeError;
use crate::models::{CapturedPayload, RawDocument};
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// Something that can hand the pipeline one captured page.
///
/// Sources are awaited in place and never spawned, so the returned futures
/// carry no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn load(&self) -> Result<RawDocument, ScrapeError>;
}

/// First path segment made of 5 to 9 digits, e.g. `723566` in
/// `https://www.fplmundo.com/723566/`.
pub fn league_code(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .find(|seg| (5..=9).contains(&seg.len()) && seg.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
}

/// League page to fetch for `url`, falling back to the Premier league.
pub fn league_page_url(url: &str) -> String {
    let code = league_code(url).unwrap_or_else(|| DEFAULT_LEAGUE_CODE.to_string());
    format!("{SITE_BASE}/{code}")
}

/// Parse a captured response body. Only JSON objects and arrays are kept.
pub fn parse_payload(source_url: &str, body: &str) -> Result<CapturedPayload, ScrapeError> {
    let trimmed = body.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Err(ScrapeError::malformed(source_url, "not a JSON object or array"));
    }
    let json = serde_json::from_str(trimmed).map_err(|e| ScrapeError::malformed(source_url, e))?;
    Ok(CapturedPayload {
        source_url: source_url.to_string(),
        json,
    })
}

/// Parse a payload dump file: the source URL on the first line, JSON after it.
pub fn parse_payload_dump(text: &str) -> Result<CapturedPayload, ScrapeError> {
    let Some((source_url, body)) = text.split_once('\n') else {
        return Err(ScrapeError::malformed("<dump>", "missing source URL line"));
    };
    parse_payload(source_url.trim(), body)
}

/// Markup file plus payload dump files on disk.
#[derive(Debug, Clone)]
pub struct DumpSource {
    pub html_path: PathBuf,
    pub payload_paths: Vec<PathBuf>,
}

impl DocumentSource for DumpSource {
    #[instrument(level = "info", skip_all, fields(html = %self.html_path.display()))]
    async fn load(&self) -> Result<RawDocument, ScrapeError> {
        let markup = fs::read_to_string(&self.html_path).await?;

        let mut payloads = Vec::new();
        for path in &self.payload_paths {
            let text = match fs::read_to_string(path).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable payload");
                    continue;
                }
            };
            match parse_payload_dump(&text) {
                Ok(payload) => payloads.push(payload),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping malformed payload"),
            }
        }

        info!(
            bytes = markup.len(),
            payloads = payloads.len(),
            "Loaded captured page"
        );
        Ok(RawDocument { markup, payloads })
    }
}

/// Static fetch of the league page. Captures no payloads and does not
/// attempt any consent handling.
#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
}

impl DocumentSource for HttpSource {
    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn load(&self) -> Result<RawDocument, ScrapeError> {
        let url = Url::parse(&self.url)?;
        let markup = reqwest::get(url).await?.error_for_status()?.text().await?;
        info!(bytes = markup.len(), "Fetched league page");
        Ok(RawDocument::from_markup(markup))
    }
}
