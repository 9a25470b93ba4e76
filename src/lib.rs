//! # CNN Lite News
//!
//! Collects the day's articles from [CNN Lite](https://lite.cnn.com) into a
//! single JSON file.
//!
//! ## Architecture
//!
//! 1. **Indexing**: fetch the listing page and find the article links
//! 2. **Fetching**: download every article, a bounded number at a time
//! 3. **Extraction**: pull the headline, metadata and body out of each page
//! 4. **Output**: write the collection as indented JSON
//!
//! Failures of single articles are logged and skipped; only failing to index
//! the listing page or to write the output ends a run.

pub mod config;
pub mod edition;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::ScraperConfig;
pub use edition::Edition;
pub use error::{Result, ScrapeError};
pub use models::{ArticleCollection, Document, KeyBy};
