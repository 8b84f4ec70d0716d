//! Web server module.
//!
//! Routes:
//! - `POST /api/submit`: relay a form submission, then redirect
//! - `GET /api/pricing`: price tables for the site's live preview
//! - `GET /api/quote`: one quote from the authoritative calculator
//! - `GET /health`

pub mod handlers;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, pricing_table, quote_preview, submit, AppState, HealthResponse, PricingTable,
    QuoteParams, QuoteResponse, THANK_YOU_PATH,
};

/// Build the application router.
///
/// `/api/submit` accepts every verb so the handler can answer non-POST
/// requests with its own JSON 405.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/submit", any(submit))
        .route("/api/pricing", get(pricing_table))
        .route("/api/quote", get(quote_preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
