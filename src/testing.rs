//! Test doubles: a canned-response [`Fetcher`] and fixture markup builders.

use crate::error::FetchError;
use crate::fetch::Fetcher;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

enum Canned {
    Body(String),
    Status(u16),
}

/// Serves markup from a map. Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Canned>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Canned::Body(markup.into()));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.pages.insert(url.into(), Canned::Status(status));
        self
    }

    /// Hold every fetch open for `delay` so requests overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.pages.get(url) {
            Some(Canned::Body(markup)) => Ok(markup.clone()),
            Some(Canned::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// A listing page linking each of `hrefs`, plus a few non-article links.
pub fn index_page(hrefs: &[&str]) -> String {
    let mut markup = String::from(
        "<!DOCTYPE html><html><body><header><a href=\"/\">CNN Lite</a></header><ul>",
    );
    for href in hrefs {
        markup.push_str(&format!("<li class=\"card--lite\"><a href=\"{href}\">story</a></li>"));
    }
    markup.push_str("</ul><footer><a href=\"/terms\">Terms</a></footer></body></html>");
    markup
}

/// An article page in the CNN Lite layout. `byline: None` leaves the element out.
pub fn article_page(headline: &str, byline: Option<&str>, paragraphs: &[&str]) -> String {
    let mut markup = String::from("<!DOCTYPE html><html><body><h2>CNN Lite</h2><article>");
    markup.push_str(&format!("<h2 class=\"headline--lite\">{headline}</h2>"));
    if let Some(byline) = byline {
        markup.push_str(&format!("<div id=\"byline\">{byline}</div>"));
    }
    markup.push_str("<div id=\"published datetime\">Updated: 6:00 AM EDT, Mon May 6, 2024</div>");
    markup.push_str("<div id=\"source\">Source: CNN</div>");
    markup.push_str("<div id=\"editorsNote\"></div>");
    for paragraph in paragraphs {
        markup.push_str(&format!("<p class=\"paragraph--lite\">{paragraph}</p>"));
    }
    markup.push_str("</article></body></html>");
    markup
}
