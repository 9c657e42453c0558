//! Handlers for the HTTP surface.

pub mod products;

pub use products::*;

use std::sync::Arc;

use crate::config::Config;
use crate::feed::FeedTransport;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Showcase configuration.
    pub config: Config,
    /// Transport used by every pipeline run.
    pub transport: Arc<dyn FeedTransport>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Config, transport: Arc<dyn FeedTransport>) -> Self {
        Self { config, transport }
    }
}
