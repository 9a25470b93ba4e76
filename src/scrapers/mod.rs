//! Markup parsers for news sources.
//!
//! A source is scraped in two phases:
//!
//! 1. **Indexing**: find article URLs on the listing page
//! 2. **Extraction**: turn one article page into a [`Document`]
//!
//! Both phases are pure functions of the markup, so they sit behind the
//! [`Parser`] trait and the pipeline can be driven with fixture pages.
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | CNN Lite | [`cnn`] | Text-only version of CNN |

use crate::error::{ExtractError, ParseError};
use crate::models::Document;

pub mod cnn;

pub trait Parser {
    /// Absolute article URLs linked from the listing page, in page order.
    fn parse_index(&self, markup: &str, base_url: &str) -> Result<Vec<String>, ParseError>;

    /// Extract one article page fetched from `url`.
    fn extract_article(&self, markup: &str, url: &str) -> Result<Document, ExtractError>;
}
