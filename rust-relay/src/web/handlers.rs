//! HTTP endpoint handlers.
//!
//! The submit handler checks method and configuration before touching the
//! body, then hands the decoded submission to the relay.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ErrorResponse, SubmitError};
use crate::form::Submission;
use crate::pricing::{quote_from_choices, MissionType, OperatorCount, ValueTier};
use crate::relay::{Relay, SequenceCounters};
use crate::Config;

/// Where submitters land after a successful submission.
pub const THANK_YOU_PATH: &str = "/submitted.html";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(config: &Config, client: Client) -> Self {
        let relay = Relay::new(
            client,
            config.webhooks.clone(),
            config.webhook_timeout,
            Arc::new(SequenceCounters::new()),
        );

        Self { relay }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Form Submission
// =============================================================================

/// Form submission endpoint.
///
/// This endpoint:
/// 1. Rejects anything but POST
/// 2. Rejects requests when no webhook is configured
/// 3. Decodes the body (JSON or URL-encoded)
/// 4. Relays the formatted message and redirects to the thank-you page
pub async fn submit(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Redirect, SubmitError> {
    if method != Method::POST {
        warn!(method = %method, "submission_method_rejected");
        return Err(SubmitError::MethodNotAllowed(method.to_string()));
    }

    state.relay.ensure_configured()?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    info!(
        content_type = ?content_type,
        body_length = body.len(),
        "submission_received"
    );

    let submission = Submission::parse(content_type, &body)?;
    let delivered = state.relay.relay(&submission).await?;

    info!(
        category = delivered.category.as_str(),
        sequence = ?delivered.sequence,
        "submission_relayed"
    );

    Ok(Redirect::to(THANK_YOU_PATH))
}

// =============================================================================
// Pricing
// =============================================================================

#[derive(Serialize)]
pub struct MissionPrice {
    pub mission: MissionType,
    pub base_price: u64,
}

#[derive(Serialize)]
pub struct TierMultiplier {
    pub tier: ValueTier,
    pub multiplier: f64,
}

#[derive(Serialize)]
pub struct OperatorMultiplier {
    pub operators: u64,
    pub multiplier: f64,
}

/// Every table the price formula reads from.
#[derive(Serialize)]
pub struct PricingTable {
    pub missions: Vec<MissionPrice>,
    pub value_multipliers: Vec<TierMultiplier>,
    pub operator_multipliers: Vec<OperatorMultiplier>,
}

/// Pricing tables for the site's cost preview.
pub async fn pricing_table() -> Json<PricingTable> {
    Json(PricingTable {
        missions: MissionType::ALL
            .into_iter()
            .map(|mission| MissionPrice {
                mission,
                base_price: mission.base_price(),
            })
            .collect(),
        value_multipliers: ValueTier::ALL
            .into_iter()
            .map(|tier| TierMultiplier {
                tier,
                multiplier: tier.multiplier(),
            })
            .collect(),
        operator_multipliers: OperatorCount::ALL
            .into_iter()
            .map(|count| OperatorMultiplier {
                operators: count.count(),
                multiplier: count.multiplier(),
            })
            .collect(),
    })
}

/// Query string for a quote preview. Values are the raw form selections.
#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub mission: Option<String>,
    pub value: Option<String>,
    pub duration: Option<String>,
    pub operators: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub mission: MissionType,
    pub total: u64,
    pub deposit: u64,
}

/// Quote preview using the same calculation as submitted contracts.
pub async fn quote_preview(Query(params): Query<QuoteParams>) -> Response {
    let Some(mission) = params.mission.as_deref().and_then(MissionType::from_key) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Unknown mission",
            }),
        )
            .into_response();
    };

    let quote = quote_from_choices(
        mission,
        params.value.as_deref(),
        params.duration.as_deref(),
        params.operators.as_deref(),
    );

    Json(QuoteResponse {
        mission,
        total: quote.total,
        deposit: quote.deposit,
    })
    .into_response()
}
