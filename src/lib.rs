//! Showcase - storefront product feed pipeline
//!
//! Fetches a storefront's product feed through an ordered list of sources,
//! normalizes and categorizes the products and renders them into the
//! landing page's product container.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod render;
pub mod showcase;
pub mod web;

pub use config::{Config, FallbackProduct};
pub use error::{Result, ShowcaseError};
pub use feed::{
    classify, Category, FeedFetcher, FeedTransport, FetchFailure, HttpTransport, ProductRecord,
    RawProduct, SourceDescriptor,
};
pub use render::{DirectiveAnimator, LandingPage, ProductRenderer, SlotDocument};
pub use showcase::{
    render_page, ExhaustionBehavior, InitOutcome, ProductOrigin, RenderStrategy, RenderSummary,
    RenderedPage, Showcase, ShowcaseState,
};
