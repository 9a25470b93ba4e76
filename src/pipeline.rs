//! The fetch-and-extract pipeline.
//!
//! 1. **Indexing**: fetch the listing page and parse it into article URLs
//! 2. **Fetching**: fetch and extract every URL, `workers` at a time
//! 3. **Collecting**: insert each finished [`Document`] into the collection
//!
//! Workers never touch the collection. Each one hands its result back through
//! `buffer_unordered`, and the single task driving the stream owns the map and
//! does every insert. Results arrive in completion order, which depends on the
//! network, so nothing downstream may rely on insertion order.

use crate::config::DEFAULT_WORKERS;
use crate::error::{ArticleError, ScrapeError};
use crate::fetch::Fetcher;
use crate::models::{ArticleFailure, Document, Harvest, KeyBy};
use crate::scrapers::Parser;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct Pipeline<F, P> {
    fetcher: F,
    parser: P,
    workers: usize,
    key_by: KeyBy,
}

impl<F, P> Pipeline<F, P>
where
    F: Fetcher,
    P: Parser,
{
    pub fn new(fetcher: F, parser: P) -> Self {
        Self {
            fetcher,
            parser,
            workers: DEFAULT_WORKERS,
            key_by: KeyBy::default(),
        }
    }

    /// Maximum concurrent article fetches. Zero is treated as one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn key_by(mut self, key_by: KeyBy) -> Self {
        self.key_by = key_by;
        self
    }

    /// Fetch the listing page and return the article URLs it links to.
    #[instrument(level = "info", skip(self))]
    pub async fn index(&self, base_url: &str) -> Result<Vec<String>, ScrapeError> {
        let markup = self.fetcher.fetch(base_url).await?;
        match self.parser.parse_index(&markup, base_url) {
            Ok(urls) => Ok(urls),
            Err(e) => {
                debug!(preview = %truncate_for_log(&markup, 300), "Index markup");
                Err(e.into())
            }
        }
    }

    /// Fetch one article and extract it.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_article(&self, url: &str) -> Result<Document, ArticleError> {
        let markup = self.fetcher.fetch(url).await?;
        Ok(self.parser.extract_article(&markup, url)?)
    }

    /// Collect every article linked from `base_url`.
    ///
    /// Fetches the listing page, then fetches and extracts each article with
    /// at most `workers` requests in flight. Article failures are recorded in
    /// [`Harvest::failures`] and never stop the other articles. Returns once
    /// every article has finished.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The listing page, also prefixed to each article link
    ///
    /// # Returns
    ///
    /// A [`Harvest`] holding the discovered URLs, the collected documents
    /// keyed by [`KeyBy`], the per-article failures and the collision count.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Fetch`] if the listing page cannot be fetched
    /// - [`ScrapeError::Parse`] if it links to no articles
    /// - [`ScrapeError::NoArticlesFound`] if the parser returns an empty list
    #[instrument(level = "info", skip(self), fields(workers = self.workers, key_by = %self.key_by))]
    pub async fn collect_today(&self, base_url: &str) -> Result<Harvest, ScrapeError> {
        let t0 = Instant::now();

        let urls = match self.index(base_url).await {
            Ok(urls) => urls,
            Err(e) => {
                error!(error = %e, "Failed to index articles");
                return Err(e);
            }
        };
        if urls.is_empty() {
            return Err(ScrapeError::NoArticlesFound {
                base_url: base_url.to_string(),
            });
        }
        info!(count = urls.len(), "Collecting articles");

        let mut harvest = Harvest::default();
        let mut results = stream::iter(urls.iter())
            .map(|url| async move { (url, self.fetch_article(url).await) })
            .buffer_unordered(self.workers);

        while let Some((url, result)) = results.next().await {
            match result {
                Ok(doc) => {
                    debug!(%url, headline = %doc.headline, "Collected article");
                    if let Some(replaced) = harvest.insert(self.key_by, doc) {
                        warn!(
                            %url,
                            replaced_url = %replaced.url,
                            headline = %replaced.headline,
                            "Duplicate key; keeping the later article"
                        );
                    }
                }
                Err(error) => {
                    warn!(%url, %error, "Skipping article");
                    harvest.failures.push(ArticleFailure {
                        url: url.clone(),
                        error,
                    });
                }
            }
        }
        drop(results);
        harvest.urls = urls;

        info!(
            urls = harvest.urls.len(),
            collected = harvest.articles.len(),
            failed = harvest.failures.len(),
            collisions = harvest.collisions,
            elapsed_ms = t0.elapsed().as_millis(),
            "Collected articles"
        );
        Ok(harvest)
    }
}
