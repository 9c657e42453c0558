//! Configuration module for the showcase.

use serde::Deserialize;
use std::path::Path;

use crate::feed::{default_sources, Category, SourceDescriptor, FEED_URL_PLACEHOLDER};
use crate::showcase::{ExhaustionBehavior, RenderStrategy};
use crate::{Result, ShowcaseError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (empty = any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Feed retrieval configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL of the storefront's RSS feed.
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Sources tried in order. `{url}` in a template is replaced by the
    /// encoded feed URL.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceDescriptor>,
    /// A source must yield at least this many records to be used.
    #[serde(default = "default_min_items")]
    pub min_items: usize,
    /// Total request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_feed_url() -> String {
    "https://thebase.com/note_store/note_store_apps_rss/feed/f00f9466d7f368ed02969b9aacfcf435d7f36bab"
        .to_string()
}

fn default_min_items() -> usize {
    1
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            sources: default_sources(),
            min_items: default_min_items(),
            request_timeout_secs: None,
        }
    }
}

/// A product shown when every feed source fails.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FallbackProduct {
    /// Display title.
    pub title: String,
    /// Product page URL.
    pub link: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Formatted price.
    #[serde(default)]
    pub price: Option<String>,
    /// Category tag; classified from the title when omitted.
    #[serde(default)]
    pub category: Option<Category>,
}

impl FallbackProduct {
    fn new(title: &str, link: &str, thumbnail: &str, price: &str, category: Category) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            thumbnail: Some(thumbnail.to_string()),
            price: Some(price.to_string()),
            category: Some(category),
        }
    }
}

fn default_fallback() -> Vec<FallbackProduct> {
    vec![
        FallbackProduct::new(
            "【エチオピア】モカ ゲイシャ G1 Natural 150g",
            "https://mukai6666.thebase.in/items/124050080",
            "https://baseec-img-mng.akamaized.net/images/item/origin/0cfd23a87bc0501286a77d7966609f8d.jpg?imformat=generic&q=90&im=Resize,width=300,type=normal",
            "1,720円",
            Category::Ethiopia,
        ),
        FallbackProduct::new(
            "【エチオピア】モカ チェルベサ G1 Natural 150g",
            "https://mukai6666.thebase.in/items/114467561",
            "https://baseec-img-mng.akamaized.net/images/item/origin/3d6f16d41ea4e83ec52461c4ee35d336.jpg?imformat=generic&q=90&im=Resize,width=300,type=normal",
            "1,620円",
            Category::Ethiopia,
        ),
        FallbackProduct::new(
            "タンザニア AA トップ イエンガ -Speciality- 150g",
            "https://mukai6666.thebase.in/items/105116833",
            "https://baseec-img-mng.akamaized.net/images/item/origin/5c2a378346e48ff1ce2fac058a75f096.jpg?imformat=generic&q=90&im=Resize,width=300,type=normal",
            "1,600円",
            Category::Tanzania,
        ),
    ]
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Page title.
    #[serde(default = "default_page_title")]
    pub page_title: String,
    /// Maximum number of products shown.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Image used when a product has no thumbnail.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Storefront root, used for missing links and the empty state.
    #[serde(default = "default_storefront_url")]
    pub storefront_url: String,
    /// Id of the product container element.
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Number of container lookups before giving up.
    #[serde(default = "default_container_retry_attempts")]
    pub container_retry_attempts: u32,
    /// Delay between container lookups in milliseconds.
    #[serde(default = "default_container_retry_delay")]
    pub container_retry_delay_ms: u64,
    /// What to show while the feed is fetched.
    #[serde(default)]
    pub render_strategy: RenderStrategy,
    /// What to show when every source failed.
    #[serde(default)]
    pub on_exhaustion: ExhaustionBehavior,
    /// Products shown when every source failed.
    #[serde(default = "default_fallback")]
    pub fallback: Vec<FallbackProduct>,
}

fn default_page_title() -> String {
    "MUKAI COFFEE ROASTERS".to_string()
}

fn default_max_items() -> usize {
    3
}

fn default_placeholder_image() -> String {
    "https://images.unsplash.com/photo-1514432324607-a09d9b4aefdd?auto=format&fit=crop&q=80"
        .to_string()
}

fn default_storefront_url() -> String {
    "https://mukai6666.thebase.in/".to_string()
}

fn default_container_id() -> String {
    "product-list".to_string()
}

fn default_container_retry_attempts() -> u32 {
    10
}

fn default_container_retry_delay() -> u64 {
    500
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            max_items: default_max_items(),
            placeholder_image: default_placeholder_image(),
            storefront_url: default_storefront_url(),
            container_id: default_container_id(),
            container_retry_attempts: default_container_retry_attempts(),
            container_retry_delay_ms: default_container_retry_delay(),
            render_strategy: RenderStrategy::default(),
            on_exhaustion: ExhaustionBehavior::default(),
            fallback: default_fallback(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/showcase.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ShowcaseError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ShowcaseError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SHOWCASE_FEED_URL`: Override the feed URL
    pub fn apply_env_overrides(&mut self) {
        if let Ok(feed_url) = std::env::var("SHOWCASE_FEED_URL") {
            if !feed_url.is_empty() {
                self.feed.url = feed_url;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.display.max_items == 0 {
            return Err(ShowcaseError::Config(
                "display.max_items must be at least 1".to_string(),
            ));
        }
        if self.feed.min_items == 0 || self.feed.min_items > self.display.max_items {
            return Err(ShowcaseError::Config(format!(
                "feed.min_items must be between 1 and display.max_items ({})",
                self.display.max_items
            )));
        }
        if self.display.container_retry_attempts == 0 {
            return Err(ShowcaseError::Config(
                "display.container_retry_attempts must be at least 1".to_string(),
            ));
        }
        if self.display.container_id.trim().is_empty() {
            return Err(ShowcaseError::Config(
                "display.container_id must not be empty".to_string(),
            ));
        }

        validate_http_url("feed.url", &self.feed.url)?;
        validate_http_url("display.storefront_url", &self.display.storefront_url)?;
        for source in &self.feed.sources {
            let expanded = source
                .url_template
                .replace(FEED_URL_PLACEHOLDER, "feed");
            validate_http_url("feed.sources.url_template", &expanded)?;
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ShowcaseError::Config(format!("{field}: invalid URL {value:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ShowcaseError::Config(format!(
            "{field}: unsupported URL scheme: {scheme}"
        ))),
    }
}
