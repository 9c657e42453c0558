//! Response DTOs.

use serde::Serialize;

use crate::feed::ProductRecord;
use crate::showcase::{ProductOrigin, RenderSummary};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Products rendered by one pipeline run.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// Live source or fallback.
    pub origin: ProductOrigin,
    /// Number of records.
    pub count: usize,
    /// Normalized records.
    pub products: Vec<ProductRecord>,
}

impl From<RenderSummary> for ProductsResponse {
    fn from(summary: RenderSummary) -> Self {
        Self {
            origin: summary.origin,
            count: summary.products.len(),
            products: summary.products,
        }
    }
}
