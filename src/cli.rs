//! Command-line interface definitions.
//!
//! All options have defaults; with no arguments the Premier league page is
//! fetched over plain HTTP.

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use mundo_news::config::DEFAULT_URL;
use std::path::PathBuf;

/// Extract gameweek review stories from an FPL Mundo league page.
///
/// # Examples
///
/// ```sh
/// # Fetch the Premier league page and print commands
/// mundo_news
///
/// # Use a page captured by a browser session, with its API payloads
/// mundo_news https://www.fplmundo.com/723566 --html page.html --payload feed.txt
///
/// # Run twice, merge, and print a JSON report
/// mundo_news https://www.fplmundo.com/123456 --runs 2 --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// League page URL; its numeric path segment selects the league
    #[arg(default_value = DEFAULT_URL)]
    pub url: String,

    /// Read rendered markup from this file instead of fetching the page
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Captured payload file (source URL on the first line, JSON after); repeatable
    #[arg(long = "payload", requires = "html")]
    pub payloads: Vec<PathBuf>,

    /// Write the captured page and payloads into this directory
    #[arg(long)]
    pub dump: Option<String>,

    /// Number of scrape runs to merge
    #[arg(long, default_value_t = 1, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub runs: usize,

    /// Print a JSON report instead of raw command lines
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report under this directory
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Optional path to a YAML extraction config
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the maximum number of stories
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub quota: Option<usize>,
}
