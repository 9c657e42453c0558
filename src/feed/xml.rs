//! RSS/XML body parser.
//!
//! Reads `item` elements with a namespace-aware reader. The thumbnail comes
//! from the media RSS `thumbnail@url` attribute and the price from the
//! `note:price` element. Any well-formedness error fails the whole body;
//! records are never returned from a partially parsed document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::failure::FetchFailure;
use super::types::RawProduct;

/// Media RSS namespace (`media:thumbnail`).
pub const MEDIA_NS: &[u8] = b"http://search.yahoo.com/mrss/";

/// Namespace of the storefront's price extension (`note:price`).
pub const NOTE_NS: &[u8] = b"https://note.com";

/// RSS 1.0 default namespace; treated like un-namespaced RSS 2.0.
const RSS1_NS: &[u8] = b"http://purl.org/rss/1.0/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Rss,
    Media,
    Note,
    Foreign,
}

fn namespace_of(resolved: &ResolveResult) -> Ns {
    match resolved {
        ResolveResult::Unbound => Ns::Rss,
        ResolveResult::Bound(Namespace(uri)) if *uri == RSS1_NS => Ns::Rss,
        ResolveResult::Bound(Namespace(uri)) if *uri == MEDIA_NS => Ns::Media,
        ResolveResult::Bound(Namespace(uri)) if *uri == NOTE_NS => Ns::Note,
        _ => Ns::Foreign,
    }
}

/// Item child whose text is currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Price,
    Other,
}

/// Parse an RSS document into raw products.
///
/// At most `limit` products are collected; the rest of the document is
/// still read so that trailing malformed markup is detected.
pub fn parse_rss(body: &str, limit: usize) -> Result<Vec<RawProduct>, FetchFailure> {
    let mut reader = NsReader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut products = Vec::new();
    let mut current: Option<RawProduct> = None;
    let mut field = Field::Other;
    let mut depth = 0usize;
    let mut item_depth = 0usize;
    let mut seen_root = false;

    loop {
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| FetchFailure::format(format!("XML parse error: {e}")))?;
        let ns = namespace_of(&resolved);

        match event {
            Event::Start(start) => {
                depth += 1;
                seen_root = true;
                let in_item = current.is_some() && depth == item_depth + 1;
                field = match (ns, start.local_name().as_ref()) {
                    (Ns::Rss, b"item") if current.is_none() => {
                        current = Some(RawProduct::default());
                        item_depth = depth;
                        Field::Other
                    }
                    (Ns::Media, b"thumbnail") => {
                        set_thumbnail(current.as_mut(), &start)?;
                        Field::Other
                    }
                    (Ns::Note, b"price") if current.is_some() => Field::Price,
                    (Ns::Rss, b"title") if in_item => Field::Title,
                    (Ns::Rss, b"link") if in_item => Field::Link,
                    _ => Field::Other,
                };
            }
            Event::Empty(start) => {
                seen_root = true;
                if ns == Ns::Media && start.local_name().as_ref() == b"thumbnail" {
                    set_thumbnail(current.as_mut(), &start)?;
                }
            }
            Event::Text(text) if field != Field::Other => {
                let value = text
                    .unescape()
                    .map_err(|e| FetchFailure::format(format!("XML text error: {e}")))?;
                append_field(current.as_mut(), field, &value);
            }
            Event::CData(data) if field != Field::Other => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                append_field(current.as_mut(), field, &value);
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                field = Field::Other;
                if ns == Ns::Rss && end.local_name().as_ref() == b"item" && depth + 1 == item_depth
                {
                    if let Some(product) = current.take() {
                        if products.len() < limit {
                            products.push(tidy(product));
                        }
                    }
                }
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(FetchFailure::format(format!(
                        "unexpected end of document ({depth} unclosed element(s))"
                    )));
                }
                if !seen_root {
                    return Err(FetchFailure::format("document has no root element"));
                }
                break;
            }
            _ => {}
        }
    }

    Ok(products)
}

/// Take the first `url` attribute of a media thumbnail.
fn set_thumbnail(
    product: Option<&mut RawProduct>,
    start: &BytesStart<'_>,
) -> Result<(), FetchFailure> {
    let Some(product) = product else {
        return Ok(());
    };
    if product.thumbnail.is_some() {
        return Ok(());
    }

    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| FetchFailure::format(format!("XML attribute error: {e}")))?;
        if attr.key.local_name().as_ref() == b"url" {
            let value = attr
                .unescape_value()
                .map_err(|e| FetchFailure::format(format!("XML attribute error: {e}")))?;
            product.thumbnail = Some(value.into_owned());
            break;
        }
    }

    Ok(())
}

fn append_field(product: Option<&mut RawProduct>, field: Field, value: &str) {
    let Some(product) = product else {
        return;
    };
    let slot = match field {
        Field::Title => &mut product.title,
        Field::Link => &mut product.link,
        Field::Price => &mut product.price,
        Field::Other => return,
    };
    slot.get_or_insert_with(String::new).push_str(value);
}

/// Trim collected values and drop blank ones.
fn tidy(product: RawProduct) -> RawProduct {
    fn clean(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    RawProduct {
        title: clean(product.title),
        link: clean(product.link),
        thumbnail: clean(product.thumbnail),
        price: clean(product.price),
        description: clean(product.description),
    }
}
