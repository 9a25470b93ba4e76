//! Data models for extracted articles and the collected edition.
//!
//! - [`Document`]: one CNN Lite article with its metadata and body text
//! - [`ArticleCollection`]: documents keyed by headline (or URL)
//! - [`Harvest`]: the outcome of one pipeline run, including failures
//!
//! `Document` serializes with the key names of the published JSON format,
//! including the space in `published datetime`.

use crate::error::ArticleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One extracted article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    /// Text of the last `<h2>` on the page.
    pub headline: String,
    /// The URL the article was fetched from.
    pub url: String,
    pub byline: String,
    #[serde(rename = "published datetime")]
    pub published_datetime: String,
    pub source: String,
    #[serde(rename = "editorsNote")]
    pub editors_note: String,
    /// All `<p>` texts joined with blank lines.
    pub article_text: String,
}

/// Which document field keys the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyBy {
    /// Compatible with the published format; duplicate headlines collide.
    #[default]
    Headline,
    /// Unique per article.
    Url,
}

impl KeyBy {
    pub fn key_of<'a>(&self, doc: &'a Document) -> &'a str {
        match self {
            KeyBy::Headline => &doc.headline,
            KeyBy::Url => &doc.url,
        }
    }
}

impl fmt::Display for KeyBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyBy::Headline => f.write_str("headline"),
            KeyBy::Url => f.write_str("url"),
        }
    }
}

impl FromStr for KeyBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "headline" => Ok(KeyBy::Headline),
            "url" => Ok(KeyBy::Url),
            other => Err(format!("unknown key {other:?}, expected \"headline\" or \"url\"")),
        }
    }
}

/// Documents keyed by [`KeyBy`]. Sorted so serialized output is stable.
pub type ArticleCollection = BTreeMap<String, Document>;

/// An article URL that was dropped from the collection, and why.
#[derive(Debug)]
pub struct ArticleFailure {
    pub url: String,
    pub error: ArticleError,
}

/// Result of collecting one edition.
#[derive(Debug, Default)]
pub struct Harvest {
    /// Article URLs discovered on the index page, in page order.
    pub urls: Vec<String>,
    pub articles: ArticleCollection,
    pub failures: Vec<ArticleFailure>,
    /// Documents that replaced an earlier document with the same key.
    pub collisions: usize,
}

impl Harvest {
    /// Insert `doc` under its key. Returns the document it replaced, if any.
    pub fn insert(&mut self, key_by: KeyBy, doc: Document) -> Option<Document> {
        let key = key_by.key_of(&doc).to_string();
        let replaced = self.articles.insert(key, doc);
        if replaced.is_some() {
            self.collisions += 1;
        }
        replaced
    }
}
