//! Error type shared by acquisition, extraction and output.

use thiserror::Error;

/// Everything that can stop a scrape.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Every extraction strategy came back empty. Usually the consent session
    /// was not seeded or the page layout changed.
    #[error("no stories found (did the consent session get seeded?)")]
    NoStoriesFound,

    #[error("malformed payload from {origin}: {reason}")]
    MalformedPayload { origin: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ScrapeError {
    /// Build a [`ScrapeError::MalformedPayload`].
    ///
    /// # Arguments
    ///
    /// * `origin` - URL or file the payload came from
    /// * `reason` - Why it was rejected, usually a parse error
    pub fn malformed(origin: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::MalformedPayload {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}
