//! Turn raw feed products into display-ready records.

use super::category::classify;
use super::text::strip_price;
use super::types::{ProductDefaults, ProductRecord, RawProduct, UNTITLED_PRODUCT};

/// Normalize a single raw product.
///
/// The category is classified from the raw title. The display title has
/// price substrings removed. Blank links, thumbnails and prices fall back to
/// the configured defaults.
pub fn normalize(raw: RawProduct, defaults: &ProductDefaults) -> ProductRecord {
    let raw_title = raw.title.unwrap_or_default();
    let category = classify(&raw_title);

    let mut title = strip_price(&raw_title);
    if title.is_empty() {
        title = UNTITLED_PRODUCT.to_string();
    }

    ProductRecord {
        title,
        link: present(raw.link).unwrap_or_else(|| defaults.storefront_url.clone()),
        thumbnail_url: present(raw.thumbnail)
            .unwrap_or_else(|| defaults.placeholder_image.clone()),
        price: present(raw.price),
        category,
        description: present(raw.description),
    }
}

/// Normalize a list, keeping at most `max_items` records.
pub fn normalize_all(
    raws: Vec<RawProduct>,
    defaults: &ProductDefaults,
    max_items: usize,
) -> Vec<ProductRecord> {
    raws.into_iter()
        .take(max_items)
        .map(|raw| normalize(raw, defaults))
        .collect()
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
