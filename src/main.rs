//! # CNN Lite News
//!
//! Scrapes today's articles from CNN Lite and writes them to a timestamped
//! JSON file keyed by headline.
//!
//! ## Usage
//!
//! ```sh
//! cnn_lite_news
//! cnn_lite_news -o ./today.json --workers 4
//! RUST_LOG=debug cnn_lite_news --sequential
//! ```
//!
//! The process exits non-zero when the listing page cannot be fetched or
//! parsed, or when the output cannot be written. Individual articles that
//! fail are logged and left out.

use clap::Parser;
use cnn_lite_news::utils::ensure_writable_dir;
use cnn_lite_news::{Edition, ScraperConfig};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cnn_lite_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let file_config = match &args.config {
        Some(path) => ScraperConfig::load(path).await?,
        None => ScraperConfig::default(),
    };
    let config = args.apply(file_config);
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    info!(
        base_url = %config.base_url,
        workers = config.workers,
        key_by = %config.key_by,
        "Configuration resolved"
    );

    // Early check: a bad output path should fail before any scraping
    if let Some(output) = &args.output {
        if let Err(e) = ensure_writable_dir(output).await {
            error!(path = %output.display(), error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    // ---- Index, fetch and extract ----
    let edition = match Edition::fetch(&config).await {
        Ok(edition) => edition,
        Err(e) => {
            error!(error = %e, "Failed to collect articles");
            return Err(e.into());
        }
    };
    info!(
        urls = edition.urls().len(),
        articles = edition.articles().len(),
        failed = edition.failures().len(),
        collisions = edition.collisions(),
        "Collected edition"
    );

    // ---- Output ----
    let path = match edition.write_json(args.output.as_deref()).await {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "Failed to write JSON");
            return Err(e.into());
        }
    };
    info!(path = %path.display(), "Wrote articles");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
