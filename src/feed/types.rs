//! Product types for the showcase feed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title used when a feed item carries no usable title.
pub const UNTITLED_PRODUCT: &str = "商品名未設定";

/// Maximum length (in characters) of a derived plain-text description.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Product category tag.
///
/// Derived from title keywords; never supplied directly by source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Ethiopia,
    Peru,
    Tanzania,
    Guatemala,
    Set,
    #[default]
    Coffee,
}

impl Category {
    /// Tag text as shown on a product card.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ethiopia => "ETHIOPIA",
            Category::Peru => "PERU",
            Category::Tanzania => "TANZANIA",
            Category::Guatemala => "GUATEMALA",
            Category::Set => "SET",
            Category::Coffee => "COFFEE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product as extracted from a feed body, before normalization.
///
/// Every field is optional; defaults are applied by
/// [`normalize`](crate::feed::normalize::normalize).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProduct {
    /// Raw feed title (may still contain a price).
    pub title: Option<String>,
    /// Product page URL.
    pub link: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
    /// Formatted price.
    pub price: Option<String>,
    /// Plain-text description excerpt.
    pub description: Option<String>,
}

impl RawProduct {
    /// Create a raw product with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

/// A normalized, classified product ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// Display title, price substrings removed. Never empty.
    pub title: String,
    /// Product page URL. Never empty.
    pub link: String,
    /// Thumbnail image URL. Never empty.
    pub thumbnail_url: String,
    /// Formatted price, if known.
    pub price: Option<String>,
    /// Category tag.
    pub category: Category,
    /// Plain-text description excerpt, if the source provides one.
    pub description: Option<String>,
}

/// Values substituted for missing product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDefaults {
    /// Storefront root, used when an item has no link.
    pub storefront_url: String,
    /// Placeholder image, used when an item has no thumbnail.
    pub placeholder_image: String,
}
