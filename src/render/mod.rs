//! Rendering module.
//!
//! Builds product views as node trees, injects them into a document
//! container and hands animation calls to the page runtime.

pub mod animation;
pub mod document;
pub mod node;
pub mod page;
pub mod renderer;
pub mod view;

pub use animation::{AnimationDirective, Animator, DirectiveAnimator, EntranceAnimation};
pub use document::{locate_container, Container, Document, RetryPolicy, Slot, SlotDocument};
pub use node::{count_class, render_nodes, Element, Node};
pub use page::LandingPage;
pub use renderer::ProductRenderer;
pub use view::{
    empty_state, loading_state, product_card, ListView, EMPTY_MESSAGE, LOADING_MESSAGE,
    PRODUCT_ITEM_CLASS, STOREFRONT_LINK_LABEL,
};
