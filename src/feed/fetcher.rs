//! Multi-source feed fetcher.
//!
//! Sources are tried strictly in order, one at a time. The first source whose
//! response is HTTP-successful, carries the expected format marker and parses
//! into enough records wins. A failed source is logged and skipped, never
//! retried. When every source fails the fetcher yields `None`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::failure::FetchFailure;
use super::source::SourceDescriptor;
use super::types::RawProduct;
use crate::error::{Result, ShowcaseError};

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Maximum response body size in bytes (5MB).
pub const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024;

/// User agent string for feed requests.
const USER_AGENT: &str = "showcase/0.1 (product feed)";

/// Something that can GET a URL and return the body text.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Fetch `url`. Non-2xx statuses are transport failures.
    async fn get(&self, url: &str) -> std::result::Result<String, FetchFailure>;
}

/// reqwest-backed transport.
///
/// No request timeout is applied unless one is configured.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport without a request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a transport with an optional total request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ShowcaseError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, url: &str) -> std::result::Result<String, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::transport(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchFailure::transport(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > MAX_BODY_SIZE {
                return Err(FetchFailure::transport(format!(
                    "body too large: {} bytes (max {} bytes)",
                    content_length, MAX_BODY_SIZE
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchFailure::transport(format!("failed to read response: {}", e)))?;

        if bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchFailure::transport(format!(
                "body too large: {} bytes (max {} bytes)",
                bytes.len(),
                MAX_BODY_SIZE
            )));
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// One way of obtaining products. Tried once per fetch.
#[async_trait]
pub trait SourceStrategy: Send + Sync {
    /// Name used in logs.
    fn label(&self) -> &str;

    /// Try to obtain products.
    async fn attempt(&self) -> std::result::Result<Vec<RawProduct>, FetchFailure>;
}

/// Bounds on the number of records a source must and may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLimits {
    /// Fewer records than this is an empty-result failure.
    pub min_items: usize,
    /// Parsers stop collecting at this many records.
    pub max_items: usize,
}

/// A source descriptor bound to a feed URL and a transport.
pub struct FeedSource {
    descriptor: SourceDescriptor,
    request_url: String,
    transport: Arc<dyn FeedTransport>,
    limits: ItemLimits,
}

impl FeedSource {
    /// Bind a descriptor to the feed it should fetch.
    pub fn new(
        descriptor: SourceDescriptor,
        feed_url: &str,
        transport: Arc<dyn FeedTransport>,
        limits: ItemLimits,
    ) -> Self {
        let request_url = descriptor.request_url(feed_url);
        Self {
            descriptor,
            request_url,
            transport,
            limits,
        }
    }
}

#[async_trait]
impl SourceStrategy for FeedSource {
    fn label(&self) -> &str {
        &self.request_url
    }

    async fn attempt(&self) -> std::result::Result<Vec<RawProduct>, FetchFailure> {
        debug!("Trying feed source: {}", self.request_url);

        let body = self.transport.get(&self.request_url).await?;
        debug!("Received {} bytes from {}", body.len(), self.request_url);

        let format = self.descriptor.format;
        if !format.looks_like(&body) {
            return Err(FetchFailure::format(format!(
                "body does not look like {}",
                format.as_str()
            )));
        }

        let products = format.parse(&body, self.limits.max_items)?;
        if products.len() < self.limits.min_items {
            return Err(FetchFailure::Empty {
                found: products.len(),
                required: self.limits.min_items,
            });
        }

        Ok(products)
    }
}

/// Products from the first source that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFeed {
    /// Label of the winning source.
    pub source: String,
    /// Raw products, already capped at the maximum.
    pub products: Vec<RawProduct>,
}

/// Ordered list of source strategies.
pub struct FeedFetcher {
    strategies: Vec<Box<dyn SourceStrategy>>,
}

impl FeedFetcher {
    /// Create a fetcher from strategies in priority order.
    pub fn new(strategies: Vec<Box<dyn SourceStrategy>>) -> Self {
        Self { strategies }
    }

    /// Create a fetcher that tries each descriptor against the same feed.
    pub fn from_sources(
        feed_url: &str,
        sources: &[SourceDescriptor],
        transport: Arc<dyn FeedTransport>,
        limits: ItemLimits,
    ) -> Self {
        let strategies = sources
            .iter()
            .cloned()
            .map(|descriptor| {
                Box::new(FeedSource::new(
                    descriptor,
                    feed_url,
                    Arc::clone(&transport),
                    limits,
                )) as Box<dyn SourceStrategy>
            })
            .collect();

        Self::new(strategies)
    }

    /// Try each strategy in order and return the first success.
    ///
    /// Returns `None` when the list is empty or every strategy failed. This
    /// is an expected outcome, not an error.
    pub async fn fetch(&self) -> Option<FetchedFeed> {
        if self.strategies.is_empty() {
            warn!("No feed sources configured");
            return None;
        }

        for strategy in &self.strategies {
            match strategy.attempt().await {
                Ok(products) => {
                    info!(
                        "Feed source {} returned {} product(s)",
                        strategy.label(),
                        products.len()
                    );
                    return Some(FetchedFeed {
                        source: strategy.label().to_string(),
                        products,
                    });
                }
                Err(failure) => {
                    warn!(
                        kind = failure.kind(),
                        "Feed source {} failed: {}",
                        strategy.label(),
                        failure
                    );
                }
            }
        }

        warn!("All {} feed source(s) failed", self.strategies.len());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::source::BodyFormat;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item><title>ペルー ¥1,500</title><link>https://shop.example/1</link></item>
  <item><title>タンザニア</title><link>https://shop.example/2</link></item>
</channel></rss>"#;

    /// Transport answering from a fixed table and recording requests.
    #[derive(Default)]
    struct TableTransport {
        responses: HashMap<String, std::result::Result<String, FetchFailure>>,
        requests: Mutex<Vec<String>>,
    }

    impl TableTransport {
        fn with(mut self, url: &str, response: std::result::Result<&str, FetchFailure>) -> Self {
            self.responses
                .insert(url.to_string(), response.map(str::to_string));
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FeedTransport for TableTransport {
        async fn get(&self, url: &str) -> std::result::Result<String, FetchFailure> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchFailure::transport("HTTP error: 404 Not Found")))
        }
    }

    const LIMITS: ItemLimits = ItemLimits {
        min_items: 1,
        max_items: 3,
    };

    fn sources() -> Vec<SourceDescriptor> {
        vec![
            SourceDescriptor::new("https://a.example/?{url}", BodyFormat::Xml),
            SourceDescriptor::new("https://b.example/?{url}", BodyFormat::Xml),
            SourceDescriptor::new("https://c.example/?{url}", BodyFormat::Json),
        ]
    }

    const FEED: &str = "feed";

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let transport = Arc::new(
            TableTransport::default()
                .with("https://a.example/?feed", Ok(RSS))
                .with("https://b.example/?feed", Ok(RSS)),
        );
        let fetcher = FeedFetcher::from_sources(FEED, &sources(), transport.clone(), LIMITS);

        let fetched = fetcher.fetch().await.unwrap();
        assert_eq!(fetched.source, "https://a.example/?feed");
        assert_eq!(fetched.products.len(), 2);
        assert_eq!(transport.requests(), vec!["https://a.example/?feed"]);
    }

    #[tokio::test]
    async fn test_failures_fall_through_in_order_without_retry() {
        let transport = Arc::new(
            TableTransport::default()
                .with(
                    "https://a.example/?feed",
                    Err(FetchFailure::transport("HTTP error: 503")),
                )
                .with("https://b.example/?feed", Ok("<html>captcha</html>"))
                .with(
                    "https://c.example/?feed",
                    Ok(r#"{"status":"ok","items":[{"title":"グアテマラ"}]}"#),
                ),
        );
        let fetcher = FeedFetcher::from_sources(FEED, &sources(), transport.clone(), LIMITS);

        let fetched = fetcher.fetch().await.unwrap();
        assert_eq!(fetched.source, "https://c.example/?feed");
        assert_eq!(fetched.products[0].title.as_deref(), Some("グアテマラ"));
        assert_eq!(
            transport.requests(),
            vec![
                "https://a.example/?feed",
                "https://b.example/?feed",
                "https://c.example/?feed"
            ]
        );
    }

    #[tokio::test]
    async fn test_all_failed_yields_none() {
        let transport = Arc::new(TableTransport::default());
        let fetcher = FeedFetcher::from_sources(FEED, &sources(), transport.clone(), LIMITS);

        assert!(fetcher.fetch().await.is_none());
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_source_list_yields_none() {
        let fetcher = FeedFetcher::new(Vec::new());
        assert!(fetcher.fetch().await.is_none());
    }

    #[tokio::test]
    async fn test_format_mismatch_is_failure() {
        let transport = Arc::new(
            TableTransport::default().with("https://a.example/?feed", Ok(r#"{"status":"ok"}"#)),
        );
        let source = FeedSource::new(sources().remove(0), FEED, transport, LIMITS);

        let result = source.attempt().await;
        assert!(matches!(result, Err(FetchFailure::Format(msg)) if msg.contains("xml")));
    }

    #[tokio::test]
    async fn test_too_few_records_is_empty_failure() {
        let transport = Arc::new(TableTransport::default().with("https://a.example/?feed", Ok(RSS)));
        let limits = ItemLimits {
            min_items: 3,
            max_items: 6,
        };
        let source = FeedSource::new(sources().remove(0), FEED, transport, limits);

        assert_eq!(
            source.attempt().await,
            Err(FetchFailure::Empty {
                found: 2,
                required: 3
            })
        );
    }

    #[tokio::test]
    async fn test_max_items_applied_by_parser() {
        let transport = Arc::new(TableTransport::default().with("https://a.example/?feed", Ok(RSS)));
        let limits = ItemLimits {
            min_items: 1,
            max_items: 1,
        };
        let source = FeedSource::new(sources().remove(0), FEED, transport, limits);

        assert_eq!(source.attempt().await.unwrap().len(), 1);
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new().is_ok());
        assert!(HttpTransport::with_timeout(Some(Duration::from_secs(5))).is_ok());
    }
}
