//! Command-line interface definitions.
//!
//! Every option is optional; with no arguments the binary scrapes
//! `https://lite.cnn.com` with ten workers and writes
//! `cnn_lite_<YYYYMMDDHHMM>.json` to the current directory.

use cnn_lite_news::{KeyBy, ScraperConfig};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Flags override values from `--config`, which override the defaults.
///
/// ```sh
/// cnn_lite_news
/// cnn_lite_news -o today.json --workers 4
/// cnn_lite_news --key-by url --config scraper.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output JSON file (default: cnn_lite_<YYYYMMDDHHMM>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing page to scrape
    #[arg(long)]
    pub base_url: Option<String>,

    /// Number of articles fetched concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Key the output by `headline` or `url`
    #[arg(long)]
    pub key_by: Option<KeyBy>,

    /// Fetch articles one at a time
    #[arg(long, conflicts_with = "workers")]
    pub sequential: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ScraperConfig) -> ScraperConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.sequential {
            config.workers = 1;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(key_by) = self.key_by {
            config.key_by = key_by;
        }
        config
    }
}
