//! Product list views.

use super::node::{Element, Node};
use crate::feed::ProductRecord;

/// Class hook on every product card; the animation runtime selects on it.
pub const PRODUCT_ITEM_CLASS: &str = "product-item";

/// Message shown when there is nothing to display.
pub const EMPTY_MESSAGE: &str = "現在表示できる商品がありません。";

/// Label of the storefront link in the empty state.
pub const STOREFRONT_LINK_LABEL: &str = "商品ページへ移動 →";

/// Message shown while the feed is being fetched.
pub const LOADING_MESSAGE: &str = "商品を読み込み中...";

/// What the product container should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    /// A fetch is in flight.
    Loading,
    /// Product cards; an empty slice shows the empty state.
    Products(&'a [ProductRecord]),
}

/// Swaps a broken thumbnail for the placeholder once.
const IMAGE_FALLBACK_HANDLER: &str = "this.onerror=null;this.src=this.dataset.fallbackSrc";

/// Build a product card.
pub fn product_card(record: &ProductRecord, placeholder_image: &str) -> Node {
    let image = Element::new("div").class("product-image").child(
        Element::new("img")
            .attr("src", record.thumbnail_url.as_str())
            .attr("alt", record.title.as_str())
            .attr("loading", "lazy")
            .attr("data-fallback-src", placeholder_image)
            .attr("onerror", IMAGE_FALLBACK_HANDLER),
    );

    let info = Element::new("div")
        .class("product-info")
        .child(
            Element::new("span")
                .class("product-category")
                .text(record.category.as_str()),
        )
        .child(
            Element::new("h4")
                .class("product-title")
                .text(record.title.as_str()),
        )
        .maybe_child(
            record
                .price
                .as_deref()
                .map(|price| Element::new("span").class("product-price").text(price)),
        )
        .maybe_child(record.description.as_deref().map(|description| {
            Element::new("p")
                .class("product-description")
                .text(description)
        }));

    Element::new("a")
        .attr("href", record.link.as_str())
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .class(PRODUCT_ITEM_CLASS)
        .child(image)
        .child(info)
        .child(Element::new("div").class("product-arrow").text("↗"))
        .into()
}

/// Build the empty state with a link to the storefront.
pub fn empty_state(storefront_url: &str) -> Node {
    Element::new("div")
        .class("product-empty text-center py-12")
        .child(
            Element::new("p")
                .class("text-sm text-brand-gray mb-4")
                .text(EMPTY_MESSAGE),
        )
        .child(
            Element::new("a")
                .attr("href", storefront_url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .class("inline-block text-xs border-b border-brand-black pb-1")
                .text(STOREFRONT_LINK_LABEL),
        )
        .into()
}

/// Build the loading indicator.
pub fn loading_state() -> Node {
    Element::new("div")
        .class("product-loading text-center py-12")
        .attr("aria-busy", "true")
        .child(Element::new("div").class("spinner"))
        .child(
            Element::new("p")
                .class("text-sm text-brand-gray")
                .text(LOADING_MESSAGE),
        )
        .into()
}
