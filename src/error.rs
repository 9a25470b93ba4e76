//! Typed errors for the scraping pipeline.
//!
//! Per-article failures ([`FetchError`], [`ExtractError`]) are isolated by the
//! pipeline and reported through [`ArticleError`]. Everything wrapped by
//! [`ScrapeError`] is fatal to a run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve markup for a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, redirect or body decoding failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The request did not complete within the client timeout.
    #[error("timed out fetching {url}")]
    Timeout { url: String },
}

impl FetchError {
    /// Classify a `reqwest` error for `url`.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = source.status() {
            FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// The index page did not yield any article links.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no article links found on {base_url} ({anchors} anchors scanned)")]
    NoArticleLinks { base_url: String, anchors: usize },
}

/// A required field is missing from an article page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no <h2> headline in {url}")]
    MissingHeadline { url: String },

    #[error("missing element with id \"{field}\" in {url}")]
    MissingField { url: String, field: &'static str },
}

/// Why a single article was left out of the collection.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Failure writing the output file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize articles: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("request timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("index fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("index parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("no articles found on {base_url}")]
    NoArticlesFound { base_url: String },

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
