//! Source descriptors: where to fetch the feed and what body to expect.

use serde::Deserialize;

use super::failure::FetchFailure;
use super::json::parse_json_feed;
use super::types::RawProduct;
use super::xml::parse_rss;

/// Placeholder in a URL template replaced by the encoded feed URL.
pub const FEED_URL_PLACEHOLDER: &str = "{url}";

/// Expected response body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// Raw RSS document, usually through a CORS proxy.
    Xml,
    /// RSS-to-JSON conversion envelope.
    Json,
}

impl BodyFormat {
    /// Check that a body carries the root marker of this format.
    pub fn looks_like(&self, body: &str) -> bool {
        match self {
            BodyFormat::Xml => body.contains("<?xml") || body.contains("<rss"),
            BodyFormat::Json => body.trim_start().starts_with('{'),
        }
    }

    /// Parse a body of this format into at most `limit` raw products.
    pub fn parse(&self, body: &str, limit: usize) -> Result<Vec<RawProduct>, FetchFailure> {
        match self {
            BodyFormat::Xml => parse_rss(body, limit),
            BodyFormat::Json => parse_json_feed(body, limit),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFormat::Xml => "xml",
            BodyFormat::Json => "json",
        }
    }
}

/// A configured (URL template, body format) pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceDescriptor {
    /// URL template, e.g. `https://corsproxy.io/?{url}`.
    pub url_template: String,
    /// Body format the endpoint returns.
    pub format: BodyFormat,
}

impl SourceDescriptor {
    /// Create a new descriptor.
    pub fn new(url_template: impl Into<String>, format: BodyFormat) -> Self {
        Self {
            url_template: url_template.into(),
            format,
        }
    }

    /// Build the request URL for a feed.
    ///
    /// The feed URL is percent-encoded before substitution. Templates without
    /// the placeholder are returned unchanged.
    pub fn request_url(&self, feed_url: &str) -> String {
        self.url_template
            .replace(FEED_URL_PLACEHOLDER, &urlencoding::encode(feed_url))
    }
}

/// Sources tried when none are configured: two CORS proxies returning the raw
/// RSS document, then an RSS-to-JSON converter.
pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new("https://api.allorigins.win/raw?url={url}", BodyFormat::Xml),
        SourceDescriptor::new("https://corsproxy.io/?{url}", BodyFormat::Xml),
        SourceDescriptor::new(
            "https://api.rss2json.com/v1/api.json?rss_url={url}",
            BodyFormat::Json,
        ),
    ]
}
