//! The product showcase pipeline.
//!
//! [`Showcase`] owns everything one page load needs: the ordered feed
//! sources, the renderer, the document and animation collaborators and the
//! pipeline state. `initialize` may be called by several readiness signals;
//! only the first call runs the sequence.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{Config, FallbackProduct};
use crate::feed::{
    normalize, normalize_all, FeedFetcher, FeedTransport, ItemLimits, ProductDefaults,
    ProductRecord, RawProduct,
};
use crate::render::{
    locate_container, Animator, Container, DirectiveAnimator, Document, LandingPage, ListView,
    ProductRenderer, RetryPolicy,
};
use crate::{Result, ShowcaseError};

/// What the container shows while the feed is fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    /// Loading indicator first, then the fetched products.
    #[default]
    LoadingFirst,
    /// Fallback products first, replaced when a source succeeds.
    FallbackFirst,
}

/// What to show when every source failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionBehavior {
    /// The configured fallback products.
    #[default]
    Fallback,
    /// The empty state with a storefront link.
    EmptyState,
}

/// Where the rendered products came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductOrigin {
    /// A feed source, identified by its label.
    Live { source: String },
    /// The configured fallback list.
    Fallback,
    /// Nothing; the empty state was rendered.
    Empty,
}

/// Pipeline state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowcaseState {
    /// `initialize` has not been called.
    Uninitialized,
    /// A sequence is running.
    Fetching,
    /// The final view is in the container.
    Rendered(ProductOrigin),
    /// The container never appeared.
    Failed,
}

/// Result of a completed sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Where the products came from.
    pub origin: ProductOrigin,
    /// Records handed to the renderer.
    pub products: Vec<ProductRecord>,
    /// Number of cards rendered.
    pub cards: usize,
}

/// Outcome of an `initialize` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// This call ran the sequence.
    Rendered(RenderSummary),
    /// Another call already started the sequence.
    AlreadyStarted,
    /// The container was not found within the retry budget.
    ContainerMissing,
}

/// Convert configured fallback products into display records.
///
/// Fallback products go through the same normalization as feed products. A
/// configured category overrides the one classified from the title.
pub fn fallback_records(
    products: &[FallbackProduct],
    defaults: &ProductDefaults,
) -> Vec<ProductRecord> {
    products
        .iter()
        .map(|product| {
            let raw = RawProduct {
                title: Some(product.title.clone()),
                link: Some(product.link.clone()),
                thumbnail: product.thumbnail.clone(),
                price: product.price.clone(),
                description: None,
            };
            let mut record = normalize(raw, defaults);
            if let Some(category) = product.category {
                record.category = category;
            }
            record
        })
        .collect()
}

/// One page load's pipeline.
pub struct Showcase {
    fetcher: FeedFetcher,
    defaults: ProductDefaults,
    fallback: Vec<ProductRecord>,
    renderer: ProductRenderer,
    strategy: RenderStrategy,
    on_exhaustion: ExhaustionBehavior,
    container_id: String,
    retry: RetryPolicy,
    document: Arc<dyn Document>,
    animator: Arc<dyn Animator>,
    state: Mutex<ShowcaseState>,
}

impl Showcase {
    /// Build a pipeline from configuration and collaborators.
    pub fn new(
        config: &Config,
        transport: Arc<dyn FeedTransport>,
        document: Arc<dyn Document>,
        animator: Arc<dyn Animator>,
    ) -> Self {
        let display = &config.display;
        let limits = ItemLimits {
            min_items: config.feed.min_items,
            max_items: display.max_items,
        };
        let defaults = ProductDefaults {
            storefront_url: display.storefront_url.clone(),
            placeholder_image: display.placeholder_image.clone(),
        };
        let fallback = fallback_records(&display.fallback, &defaults);

        Self {
            fetcher: FeedFetcher::from_sources(
                &config.feed.url,
                &config.feed.sources,
                transport,
                limits,
            ),
            fallback,
            renderer: ProductRenderer::new(
                display.max_items,
                display.placeholder_image.clone(),
                display.storefront_url.clone(),
            ),
            defaults,
            strategy: display.render_strategy,
            on_exhaustion: display.on_exhaustion,
            container_id: display.container_id.clone(),
            retry: RetryPolicy {
                attempts: display.container_retry_attempts,
                delay: Duration::from_millis(display.container_retry_delay_ms),
            },
            document,
            animator,
            state: Mutex::new(ShowcaseState::Uninitialized),
        }
    }

    /// Current pipeline state.
    pub fn state(&self) -> ShowcaseState {
        self.lock_state().clone()
    }

    /// Run the sequence: locate the container, render the interim view,
    /// fetch, then render the result.
    ///
    /// Only the first call runs; later calls return
    /// [`InitOutcome::AlreadyStarted`] without touching the running sequence.
    pub async fn initialize(&self) -> InitOutcome {
        if !self.begin() {
            debug!("Showcase already started, ignoring initialize");
            return InitOutcome::AlreadyStarted;
        }

        let Some(container) =
            locate_container(self.document.as_ref(), &self.container_id, self.retry).await
        else {
            error!(
                "Product container #{} not found, showcase not rendered",
                self.container_id
            );
            self.set_state(ShowcaseState::Failed);
            return InitOutcome::ContainerMissing;
        };

        self.render_interim(container.as_ref());

        let (origin, products) = match self.fetcher.fetch().await {
            Some(feed) => (
                ProductOrigin::Live {
                    source: feed.source,
                },
                normalize_all(feed.products, &self.defaults, self.renderer.max_items()),
            ),
            None => self.exhausted(),
        };

        let cards = self.renderer.render(
            container.as_ref(),
            ListView::Products(&products),
            self.animator.as_ref(),
        );
        info!("Showcase rendered {} product(s) from {:?}", cards, origin);

        self.set_state(ShowcaseState::Rendered(origin.clone()));
        InitOutcome::Rendered(RenderSummary {
            origin,
            products,
            cards,
        })
    }

    fn render_interim(&self, container: &dyn Container) {
        let view = match self.strategy {
            RenderStrategy::LoadingFirst => ListView::Loading,
            RenderStrategy::FallbackFirst => ListView::Products(&self.fallback),
        };
        self.renderer
            .render(container, view, self.animator.as_ref());
    }

    fn exhausted(&self) -> (ProductOrigin, Vec<ProductRecord>) {
        match self.on_exhaustion {
            ExhaustionBehavior::Fallback => {
                warn!("Using {} fallback product(s)", self.fallback.len());
                let products = self
                    .fallback
                    .iter()
                    .take(self.renderer.max_items())
                    .cloned()
                    .collect();
                (ProductOrigin::Fallback, products)
            }
            ExhaustionBehavior::EmptyState => {
                warn!("Rendering empty state");
                (ProductOrigin::Empty, Vec::new())
            }
        }
    }

    /// Move from `Uninitialized` to `Fetching`. False if already started.
    fn begin(&self) -> bool {
        let mut state = self.lock_state();
        if *state != ShowcaseState::Uninitialized {
            return false;
        }
        *state = ShowcaseState::Fetching;
        true
    }

    fn set_state(&self, next: ShowcaseState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ShowcaseState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A landing page produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// The full HTML document.
    pub html: String,
    /// The product container's content only.
    pub fragment: String,
    /// What the pipeline rendered.
    pub summary: RenderSummary,
}

/// Run a fresh pipeline against a new landing page.
pub async fn render_page(
    config: &Config,
    transport: Arc<dyn FeedTransport>,
) -> Result<RenderedPage> {
    let page = LandingPage::new(
        config.display.page_title.clone(),
        config.display.storefront_url.clone(),
        config.display.container_id.clone(),
    );
    let document = Arc::new(page.document());
    let animator = Arc::new(DirectiveAnimator::new());

    let showcase = Showcase::new(config, transport, document.clone(), animator.clone());
    let summary = match showcase.initialize().await {
        InitOutcome::Rendered(summary) => summary,
        InitOutcome::ContainerMissing => {
            return Err(ShowcaseError::Render(format!(
                "container #{} not found",
                page.container_id()
            )))
        }
        InitOutcome::AlreadyStarted => {
            return Err(ShowcaseError::Render(
                "pipeline already started".to_string(),
            ))
        }
    };

    let fragment = document
        .slot(page.container_id())
        .map(|slot| slot.inner_html())
        .unwrap_or_default();

    Ok(RenderedPage {
        html: page.render(&document, &animator),
        fragment,
        summary,
    })
}
