//! CNN Lite markup parser.
//!
//! [CNN Lite](https://lite.cnn.com) is a text-only version of CNN. The
//! listing page links each story with a site-relative path such as
//! `/2024/05/06/politics/article-slug/index.html`; joining it onto the base
//! URL gives the article address.
//!
//! Article pages carry the headline in an `<h2>` and the metadata in
//! elements whose `id` is `byline`, `published datetime`, `source` and
//! `editorsNote`. Navigation may repeat some of these before the story, so
//! the *last* match is always the one taken.

use crate::error::{ExtractError, ParseError};
use crate::models::Document;
use crate::scrapers::Parser;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

/// Substring an anchor's `href` must contain to count as an article link.
const ARTICLE_MARKER: &str = "article";

pub const BYLINE_ID: &str = "byline";
pub const PUBLISHED_ID: &str = "published datetime";
pub const SOURCE_ID: &str = "source";
pub const EDITORS_NOTE_ID: &str = "editorsNote";

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));

// `#published datetime` is not a valid id selector, so match on the attribute.
static METADATA: Lazy<[(&'static str, Selector); 4]> = Lazy::new(|| {
    [BYLINE_ID, PUBLISHED_ID, SOURCE_ID, EDITORS_NOTE_ID].map(|id| {
        let selector = Selector::parse(&format!(r#"[id="{id}"]"#)).expect("valid selector");
        (id, selector)
    })
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CnnLiteParser;

/// All descendant text of an element, concatenated without separators.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

impl Parser for CnnLiteParser {
    /// Find article links on the CNN Lite listing page.
    ///
    /// Every `<a>` whose `href` contains `"article"` is kept, in page order
    /// and including duplicates. Anchors without an `href` are skipped.
    ///
    /// # Arguments
    ///
    /// * `markup` - The listing page HTML
    /// * `base_url` - Prefixed verbatim to each site-relative `href`
    ///
    /// # Returns
    ///
    /// The absolute article URLs.
    ///
    /// # Errors
    ///
    /// [`ParseError::NoArticleLinks`] if no anchor matches.
    #[instrument(level = "info", skip(self, markup), fields(bytes = markup.len()))]
    fn parse_index(&self, markup: &str, base_url: &str) -> Result<Vec<String>, ParseError> {
        let document = Html::parse_document(markup);

        let mut anchors = 0usize;
        let mut article_urls = Vec::new();
        for element in document.select(&ANCHOR) {
            anchors += 1;
            if let Some(href) = element.value().attr("href") {
                if href.contains(ARTICLE_MARKER) {
                    article_urls.push(format!("{base_url}{href}"));
                }
            }
        }

        if article_urls.is_empty() {
            return Err(ParseError::NoArticleLinks {
                base_url: base_url.to_string(),
                anchors,
            });
        }

        info!(count = article_urls.len(), anchors, "Indexed CNN article URLs");
        debug!(urls = ?article_urls, "CNN URLs");
        Ok(article_urls)
    }

    /// Extract one CNN Lite article page.
    ///
    /// # Arguments
    ///
    /// * `markup` - The article page HTML
    /// * `url` - Address the page was fetched from, copied into the document
    ///
    /// # Returns
    ///
    /// A [`Document`] whose headline is the last `<h2>`, whose metadata
    /// fields are the last element with each `id`, and whose body is every
    /// `<p>` joined with blank lines.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MissingHeadline`] if the page has no `<h2>`
    /// - [`ExtractError::MissingField`] if any of the four metadata ids is
    ///   absent; no partial document is returned
    #[instrument(level = "debug", skip(self, markup), fields(bytes = markup.len()))]
    fn extract_article(&self, markup: &str, url: &str) -> Result<Document, ExtractError> {
        let document = Html::parse_document(markup);

        let headline = document
            .select(&HEADLINE)
            .last()
            .map(text_of)
            .ok_or_else(|| ExtractError::MissingHeadline {
                url: url.to_string(),
            })?;

        let mut fields: [String; 4] = Default::default();
        for (slot, (id, selector)) in fields.iter_mut().zip(METADATA.iter()) {
            *slot = document
                .select(selector)
                .last()
                .map(text_of)
                .ok_or_else(|| ExtractError::MissingField {
                    url: url.to_string(),
                    field: *id,
                })?;
        }
        let [byline, published_datetime, source, editors_note] = fields;

        let article_text = document.select(&PARAGRAPH).map(text_of).join("\n\n");

        debug!(%headline, bytes = article_text.len(), "Parsed CNN article");
        Ok(Document {
            headline,
            url: url.to_string(),
            byline,
            published_datetime,
            source,
            editors_note,
            article_text,
        })
    }
}
