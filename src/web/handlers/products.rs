//! Product handlers.

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::showcase::{render_page, RenderedPage};
use crate::web::dto::{ApiResponse, ProductsResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

async fn run(state: &AppState) -> Result<RenderedPage, ApiError> {
    render_page(&state.config, Arc::clone(&state.transport))
        .await
        .map_err(ApiError::from)
}

/// GET / - Full landing page.
pub async fn landing_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let page = run(&state).await?;
    Ok(Html(page.html))
}

/// GET /products - Product container content only.
pub async fn product_fragment(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let page = run(&state).await?;
    Ok(Html(page.fragment))
}

/// GET /api/products - Normalized records and where they came from.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ProductsResponse>>, ApiError> {
    let page = run(&state).await?;
    Ok(Json(ApiResponse::new(page.summary.into())))
}
