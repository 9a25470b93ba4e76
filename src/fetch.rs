//! Markup retrieval over HTTP.
//!
//! The pipeline only sees the [`Fetcher`] trait so tests can substitute
//! canned markup for the network. [`HttpFetcher`] is the `reqwest` backed
//! implementation used by the binary.

use crate::config::ScraperConfig;
use crate::error::{ConfigError, FetchError};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Something that can turn a URL into markup text.
pub trait Fetcher {
    /// Perform a single GET for `url` and return the body. No retries.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: Fetcher> Fetcher for &T {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// `reqwest` client with a per-request timeout. Non-2xx responses are errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, ConfigError> {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let result = async {
            let resp = self.client.get(url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(resp.text().await?)
        }
        .await;
        let elapsed_ms = t0.elapsed().as_millis();

        match result {
            Ok(body) => {
                debug!(bytes = body.len(), elapsed_ms, "Fetched markup");
                Ok(body)
            }
            Err(e) => {
                let err = FetchError::from_reqwest(url, e);
                warn!(elapsed_ms, error = %err, "Fetch failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one connection on a local port. `reply` is written after the
    /// request arrives; `None` keeps the connection open without answering.
    async fn one_shot_server(reply: Option<&'static str>, hold: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            if let Some(reply) = reply {
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.flush().await;
            }
            tokio::time::sleep(hold).await;
        });
        format!("http://{addr}/")
    }

    #[test]
    fn test_http_fetcher_builds_from_default_config() {
        let config = ScraperConfig::default();
        assert!(HttpFetcher::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2), "cnn_lite_news-test").unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let err = fetcher.fetch("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport { .. } | FetchError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_ok_response_returns_body() {
        let url = one_shot_server(
            Some("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok"),
            Duration::ZERO,
        )
        .await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5), "cnn_lite_news-test").unwrap();
        assert_eq!(fetcher.fetch(&url).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let url = one_shot_server(
            Some(concat!(
                "HTTP/1.1 500 Internal Server Error\r\n",
                "Content-Length: 0\r\nConnection: close\r\n\r\n",
            )),
            Duration::ZERO,
        )
        .await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5), "cnn_lite_news-test").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        match err {
            FetchError::Status { url: failed, status } => {
                assert_eq!(status, 500);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_silent_server_is_timeout() {
        let url = one_shot_server(None, Duration::from_secs(5)).await;
        let fetcher = HttpFetcher::new(Duration::from_millis(200), "cnn_lite_news-test").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
    }
}
