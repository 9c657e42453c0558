//! RSS-to-JSON envelope parser.
//!
//! Expected shape:
//!
//! ```json
//! { "status": "ok",
//!   "items": [ { "title": "...", "link": "...", "description": "<p>...</p>",
//!                "thumbnail": "...", "enclosure": { "thumbnail": "..." } } ] }
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::failure::FetchFailure;
use super::text::{find_price, first_image_url, strip_html, truncate_with_ellipsis};
use super::types::{RawProduct, MAX_DESCRIPTION_CHARS};

/// Status value of a successful conversion.
const STATUS_OK: &str = "ok";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    items: Option<Vec<JsonItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct JsonItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    /// An object when present, but converters emit `[]` or `{}` when absent.
    #[serde(default)]
    enclosure: Option<Value>,
}

/// Parse an RSS-to-JSON envelope into raw products.
///
/// A non-`ok` status and a missing or empty `items` array are failures.
pub fn parse_json_feed(body: &str, limit: usize) -> Result<Vec<RawProduct>, FetchFailure> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| FetchFailure::format(format!("JSON parse error: {e}")))?;

    match envelope.status.as_deref() {
        Some(STATUS_OK) => {}
        Some(status) => {
            let detail = envelope.message.as_deref().unwrap_or("no message");
            return Err(FetchFailure::format(format!(
                "feed status \"{status}\": {detail}"
            )));
        }
        None => return Err(FetchFailure::format("feed status missing")),
    }

    let items = envelope.items.unwrap_or_default();
    if items.is_empty() {
        return Err(FetchFailure::Empty {
            found: 0,
            required: 1,
        });
    }

    Ok(items.into_iter().take(limit).map(convert_item).collect())
}

fn convert_item(item: JsonItem) -> RawProduct {
    let description_html = non_blank(item.description);

    let thumbnail = non_blank(item.thumbnail)
        .or_else(|| {
            item.enclosure
                .as_ref()
                .and_then(|enclosure| enclosure.get("thumbnail"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .and_then(|s| non_blank(Some(s)))
        })
        .or_else(|| description_html.as_deref().and_then(first_image_url));

    let title = non_blank(item.title);

    let price = description_html
        .as_deref()
        .and_then(find_price)
        .or_else(|| title.as_deref().and_then(find_price));

    let description = description_html
        .as_deref()
        .map(strip_html)
        .filter(|text| !text.is_empty())
        .map(|text| truncate_with_ellipsis(&text, MAX_DESCRIPTION_CHARS));

    RawProduct {
        title,
        link: non_blank(item.link),
        thumbnail,
        price,
        description,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
