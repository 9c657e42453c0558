//! Landing page shell around the product container.

use super::animation::DirectiveAnimator;
use super::document::{Container, SlotDocument};
use super::node::{Element, Node};

/// Static parts of the landing page.
#[derive(Debug, Clone)]
pub struct LandingPage {
    title: String,
    storefront_url: String,
    container_id: String,
}

impl LandingPage {
    /// Create a page description.
    pub fn new(
        title: impl Into<String>,
        storefront_url: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            storefront_url: storefront_url.into(),
            container_id: container_id.into(),
        }
    }

    /// Id of the product container.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Fresh document with the product container mounted.
    pub fn document(&self) -> SlotDocument {
        let document = SlotDocument::new();
        document.attach(&self.container_id);
        document
    }

    /// The product section with the container's current content.
    pub fn product_section(&self, document: &SlotDocument) -> Element {
        let products = document
            .slot(&self.container_id)
            .map(|slot| slot.children())
            .unwrap_or_default();

        Element::new("section")
            .id("products")
            .class("products-section")
            .child(
                Element::new("div")
                    .class("section-header")
                    .child(Element::new("h2").class("section-title").text("PRODUCTS"))
                    .child(
                        Element::new("p")
                            .class("section-lead")
                            .text("自家焙煎のスペシャルティコーヒー"),
                    ),
            )
            .child(
                Element::new("div")
                    .id(self.container_id.as_str())
                    .class("product-list")
                    .children(products),
            )
            .child(
                Element::new("a")
                    .attr("href", self.storefront_url.as_str())
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .class("view-all")
                    .text("VIEW ALL ↗"),
            )
    }

    /// Serialize the full page.
    ///
    /// Recorded animation directives are handed to the browser runtime in
    /// the `data-animation-directives` attribute of `<body>`. The host page's
    /// GSAP ScrollTrigger bundle reads it on load and replays each directive
    /// (`gsap.fromTo` for `entrance`, `ScrollTrigger.refresh` for
    /// `refresh_triggers`).
    pub fn render(&self, document: &SlotDocument, animator: &DirectiveAnimator) -> String {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(Element::new("title").text(self.title.as_str()));

        let body = Element::new("body")
            .attr("data-animation-directives", animator.to_json())
            .child(Element::new("main").child(self.product_section(document)));

        let html: Node = Element::new("html")
            .attr("lang", "ja")
            .child(head)
            .child(body)
            .into();

        format!("<!DOCTYPE html>\n{}", html.render())
    }
}
