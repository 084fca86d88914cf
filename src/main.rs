//! Command-line entry point.
//!
//! ```sh
//! mundo_news https://www.fplmundo.com/723566 --runs 2 --json
//! ```
//!
//! Commands go to stdout, logs go to stderr.

use clap::Parser;
use itertools::Itertools;
use mundo_news::config::ExtractConfig;
use mundo_news::error::ScrapeError;
use mundo_news::models::ScrapeReport;
use mundo_news::outputs::command::league_tag;
use mundo_news::outputs::{dump, json};
use mundo_news::pipeline::scrape_document;
use mundo_news::source::{league_page_url, DocumentSource, DumpSource, HttpSource};
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = ExtractConfig::load(args.config.as_deref()).await?;
    if let Some(quota) = args.quota {
        config.quota = quota;
    }

    let commands = match &args.html {
        Some(html) => {
            let source = DumpSource {
                html_path: html.clone(),
                payload_paths: args.payloads.clone(),
            };
            collect_commands(&source, &args, &config).await
        }
        None => {
            let source = HttpSource {
                url: league_page_url(&args.url),
            };
            collect_commands(&source, &args, &config).await
        }
    };
    let commands = match commands {
        Ok(commands) => commands,
        Err(e) => {
            error!(error = %e, "Scrape failed");
            return Err(e.into());
        }
    };

    let report = ScrapeReport {
        source: league_tag(&args.url).to_lowercase(),
        commands,
    };

    if let Some(dir) = &args.json_output_dir {
        json::write_report(&report, dir).await?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for command in &report.commands {
            println!("{command}");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        commands = report.commands.len(),
        "Execution complete"
    );
    Ok(())
}

/// Load and scrape the page `args.runs` times, merging command lines in
/// first-seen order. Fails only if no run produced anything.
async fn collect_commands<S: DocumentSource>(
    source: &S,
    args: &Cli,
    config: &ExtractConfig,
) -> Result<Vec<String>, ScrapeError> {
    let runs = args.runs.max(1);
    let mut lines = Vec::new();

    for run in 1..=runs {
        let raw = source.load().await?;

        if let Some(dir) = &args.dump {
            if let Err(e) = dump::write_dump(&raw, dir).await {
                warn!(run, error = %e, "Failed to write diagnostic dump");
            }
        }

        match scrape_document(&raw, &args.url, config) {
            Ok(run_lines) => {
                info!(run, count = run_lines.len(), "Run produced commands");
                lines.extend(run_lines);
            }
            Err(ScrapeError::NoStoriesFound) => {
                warn!(run, "Run found no stories");
            }
            Err(e) => return Err(e),
        }
    }

    let merged: Vec<String> = lines.into_iter().unique().collect();
    if merged.is_empty() {
        return Err(ScrapeError::NoStoriesFound);
    }
    Ok(merged)
}
