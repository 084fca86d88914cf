//! Diagnostic dump of a captured page.
//!
//! ```text
//! dump_dir/
//! ├── mundo_dump.html
//! ├── mundo_json_1.txt   # source URL, then pretty JSON
//! └── mundo_json_2.txt
//! ```
//!
//! Payload files use the format read back by [`crate::source::DumpSource`].

use crate::error::ScrapeError;
use crate::models::RawDocument;
use crate::utils::ensure_writable_dir;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Only the first few payloads are worth looking at by hand.
pub const MAX_DUMPED_PAYLOADS: usize = 6;

/// Write the markup and up to [`MAX_DUMPED_PAYLOADS`] payloads into `dir`.
/// Returns the paths written, markup first.
#[instrument(level = "info", skip_all, fields(dir = %dir))]
pub async fn write_dump(raw: &RawDocument, dir: &str) -> Result<Vec<PathBuf>, ScrapeError> {
    ensure_writable_dir(dir).await?;
    let base = PathBuf::from(dir);
    let mut written = Vec::new();

    let html_path = base.join("mundo_dump.html");
    fs::write(&html_path, &raw.markup).await?;
    written.push(html_path);

    for (i, payload) in raw.payloads.iter().take(MAX_DUMPED_PAYLOADS).enumerate() {
        let path = base.join(format!("mundo_json_{}.txt", i + 1));
        let body = serde_json::to_string_pretty(&payload.json)?;
        fs::write(&path, format!("{}\n{}", payload.source_url, body)).await?;
        written.push(path);
    }

    info!(files = written.len(), "Wrote diagnostic dump");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapturedPayload;
    use crate::source::{DocumentSource, DumpSource};
    use serde_json::json;

    #[tokio::test]
    async fn test_dump_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let raw = RawDocument {
            markup: "<html><body><p>dumped</p></body></html>".to_string(),
            payloads: (0..8)
                .map(|i| CapturedPayload {
                    source_url: format!("https://api/{i}"),
                    json: json!({"n": i, "title": "é"}),
                })
                .collect(),
        };

        let written = write_dump(&raw, dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(written.len(), 1 + MAX_DUMPED_PAYLOADS);

        let source = DumpSource {
            html_path: written[0].clone(),
            payload_paths: written[1..].to_vec(),
        };
        let loaded = source.load().await.unwrap();
        assert_eq!(loaded.markup, raw.markup);
        assert_eq!(loaded.payloads, raw.payloads[..MAX_DUMPED_PAYLOADS].to_vec());
    }
}
