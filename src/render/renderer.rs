//! Product list renderer.

use tracing::debug;

use super::animation::{Animator, EntranceAnimation};
use super::document::Container;
use super::node::Node;
use super::view::{empty_state, loading_state, product_card, ListView, PRODUCT_ITEM_CLASS};
use crate::feed::ProductRecord;

/// Renders product views into a container and notifies the animator.
#[derive(Debug, Clone)]
pub struct ProductRenderer {
    max_items: usize,
    placeholder_image: String,
    storefront_url: String,
    entrance: EntranceAnimation,
}

impl ProductRenderer {
    /// Create a renderer.
    pub fn new(
        max_items: usize,
        placeholder_image: impl Into<String>,
        storefront_url: impl Into<String>,
    ) -> Self {
        Self {
            max_items,
            placeholder_image: placeholder_image.into(),
            storefront_url: storefront_url.into(),
            entrance: EntranceAnimation::default(),
        }
    }

    /// Maximum number of cards rendered.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Build the nodes for a view. The item cap is enforced here as well.
    pub fn nodes(&self, view: ListView<'_>) -> Vec<Node> {
        match view {
            ListView::Loading => vec![loading_state()],
            ListView::Products([]) => vec![empty_state(&self.storefront_url)],
            ListView::Products(records) => self.cards(records),
        }
    }

    fn cards(&self, records: &[ProductRecord]) -> Vec<Node> {
        records
            .iter()
            .take(self.max_items)
            .map(|record| product_card(record, &self.placeholder_image))
            .collect()
    }

    /// Replace the container's content with `view`.
    ///
    /// Animations registered for the previous content are cleared. Product
    /// cards get a scroll-gated entrance; every render ends with a trigger
    /// refresh. Returns the number of cards rendered.
    pub fn render(
        &self,
        container: &dyn Container,
        view: ListView<'_>,
        animator: &dyn Animator,
    ) -> usize {
        let nodes = self.nodes(view);
        let cards = match view {
            ListView::Products(records) => records.len().min(self.max_items),
            ListView::Loading => 0,
        };

        animator.clear();
        container.replace_children(nodes);
        debug!("Rendered {} product card(s) into #{}", cards, container.id());

        if cards > 0 {
            animator.animate_entrance(
                container.id(),
                &format!(".{}", PRODUCT_ITEM_CLASS),
                &self.entrance,
            );
        }
        animator.refresh_triggers();

        cards
    }
}
