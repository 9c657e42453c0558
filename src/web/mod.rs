//! HTTP surface for the showcase.
//!
//! Every request runs a fresh pipeline and serves the landing page, the
//! product fragment or the records as JSON.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
