//! Today's CNN Lite edition.
//!
//! [`Edition`] runs the pipeline once and keeps what it found: the article
//! URLs from the listing page, the collected documents and the articles that
//! failed. It can then be written out as JSON.
//!
//! ```ignore
//! let config = ScraperConfig::default();
//! let edition = Edition::fetch(&config).await?;
//! for headline in edition.headlines() {
//!     println!("{headline}");
//! }
//! let path = edition.write_json(None).await?;
//! ```

use crate::config::ScraperConfig;
use crate::error::{ExportError, ScrapeError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::models::{ArticleCollection, ArticleFailure, Harvest};
use crate::outputs::json;
use crate::pipeline::Pipeline;
use crate::scrapers::Parser;
use crate::scrapers::cnn::CnnLiteParser;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug)]
pub struct Edition {
    harvest: Harvest,
}

impl Edition {
    /// Collect today's articles from the network.
    #[instrument(level = "info", skip_all, fields(base_url = %config.base_url))]
    pub async fn fetch(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        config.validate()?;
        let fetcher = HttpFetcher::from_config(config)?;
        Self::collect(fetcher, CnnLiteParser, config).await
    }

    /// Collect with a caller-supplied fetcher and parser.
    pub async fn collect<F, P>(
        fetcher: F,
        parser: P,
        config: &ScraperConfig,
    ) -> Result<Self, ScrapeError>
    where
        F: Fetcher,
        P: Parser,
    {
        let harvest = Pipeline::new(fetcher, parser)
            .workers(config.workers)
            .key_by(config.key_by)
            .collect_today(&config.base_url)
            .await?;
        Ok(Self { harvest })
    }

    /// Article URLs from the listing page, in page order.
    pub fn urls(&self) -> &[String] {
        &self.harvest.urls
    }

    pub fn articles(&self) -> &ArticleCollection {
        &self.harvest.articles
    }

    pub fn headlines(&self) -> Vec<&str> {
        self.harvest
            .articles
            .values()
            .map(|doc| doc.headline.as_str())
            .collect()
    }

    pub fn failures(&self) -> &[ArticleFailure] {
        &self.harvest.failures
    }

    pub fn collisions(&self) -> usize {
        self.harvest.collisions
    }

    pub fn into_articles(self) -> ArticleCollection {
        self.harvest.articles
    }

    /// Write the collected articles as JSON.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file, or `None` for
    ///   `cnn_lite_<YYYYMMDDHHMM>.json` (local time) in the current directory
    ///
    /// # Returns
    ///
    /// The path that was written.
    ///
    /// # Errors
    ///
    /// Any [`ExportError`] from [`json::write_articles`].
    pub async fn write_json(&self, path: Option<&Path>) -> Result<PathBuf, ExportError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => json::default_output_path(Local::now()),
        };
        json::write_articles(&self.harvest.articles, &path).await?;
        Ok(path)
    }
}
