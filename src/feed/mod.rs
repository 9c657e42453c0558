//! Product feed module.
//!
//! Fetches the storefront's product feed from an ordered list of sources,
//! parses XML or JSON bodies and normalizes the result into display records.

pub mod category;
pub mod failure;
pub mod fetcher;
pub mod json;
pub mod normalize;
pub mod source;
pub mod text;
pub mod types;
pub mod xml;

pub use category::classify;
pub use failure::FetchFailure;
pub use fetcher::{
    FeedFetcher, FeedSource, FeedTransport, FetchedFeed, HttpTransport, ItemLimits,
    SourceStrategy, MAX_BODY_SIZE,
};
pub use json::parse_json_feed;
pub use normalize::{normalize, normalize_all};
pub use source::{default_sources, BodyFormat, SourceDescriptor, FEED_URL_PLACEHOLDER};
pub use types::{
    Category, ProductDefaults, ProductRecord, RawProduct, MAX_DESCRIPTION_CHARS, UNTITLED_PRODUCT,
};
pub use xml::parse_rss;
