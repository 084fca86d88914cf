//! JSON report output.
//!
//! Reports are filed by local date, one file per league:
//! ```text
//! json_output_dir/
//! └── 2025-10-18/
//!     ├── premier.json
//!     └── championship.json
//! ```

use crate::error::ScrapeError;
use crate::models::ScrapeReport;
use chrono::Local;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`ScrapeReport`] to `{json_output_dir}/{date}/{source}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &ScrapeReport,
    json_output_dir: &str,
) -> Result<PathBuf, ScrapeError> {
    let json = serde_json::to_string_pretty(report)?;
    let local_date = Local::now().date_naive().to_string();

    let full_json_dir = PathBuf::from(json_output_dir).join(&local_date);
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", report.source));
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename.display(), "Wrote JSON report");

    Ok(output_json_filename)
}
