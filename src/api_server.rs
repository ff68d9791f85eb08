// Axum API Server Module
//
// REST surface for the estimation + recommendation engine. /calculate and
// /recommend mirror the calculator client contract; /health is liveness.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use serde::Deserialize;

use crate::activity::{ActivityInput, EmissionResult};
use crate::error::EngineError;
use crate::estimator::estimate;
use crate::factors::{CleaningRules, EmissionFactors};
use crate::recommend::{select, RecommendationBundle, TipSource};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub factors: Arc<EmissionFactors>,
    pub rules: Arc<CleaningRules>,
    pub tip_source: Arc<dyn TipSource>,
}

impl AppState {
    pub fn new(
        factors: EmissionFactors,
        rules: CleaningRules,
        tip_source: Arc<dyn TipSource>,
    ) -> Self {
        Self {
            factors: Arc::new(factors),
            rules: Arc::new(rules),
            tip_source,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Engine endpoints (JSON API)
        .route("/calculate", post(calculate))
        .route("/recommend", post(recommend))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Calculator client is served from another origin
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<ActivityInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = estimate(&payload, &state.factors);

    tracing::debug!(
        total = result.total_emission,
        mode = ?payload.travel_mode,
        "Calculated footprint"
    );

    Ok(Json(emission_response(&result)))
}

async fn recommend(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<RecommendationBundle>, AppError> {
    let emissions = parse_emissions(&payload, &state.factors)?;

    let candidates = state.tip_source.candidates(&emissions);
    let bundle = select(&candidates, &state.rules);

    tracing::debug!(
        travel = bundle.travel.len(),
        energy = bundle.energy.len(),
        food = bundle.food.len(),
        shopping = bundle.shopping.len(),
        "Selected recommendations"
    );

    Ok(Json(bundle))
}

// ============================================================================
// Request / Response Shapes
// ============================================================================

/// The four category emission numbers, as the calculator client posts them
/// back after a /calculate round trip.
#[derive(Debug, Deserialize)]
struct EmissionsPayload {
    travel_emission: f64,
    energy_emission: f64,
    food_emission: f64,
    shopping_emission: f64,
}

/// Accept either the four emission numbers or the raw activity shape
/// (in which case emissions are derived first).
fn parse_emissions(
    payload: &serde_json::Value,
    factors: &EmissionFactors,
) -> Result<EmissionResult, AppError> {
    if let Ok(emissions) = serde_json::from_value::<EmissionsPayload>(payload.clone()) {
        return Ok(EmissionResult::from_categories(
            emissions.travel_emission,
            emissions.energy_emission,
            emissions.food_emission,
            emissions.shopping_emission,
        ));
    }

    // The activity shape is recognizable by its travelType discriminator;
    // without it an arbitrary object would always deserialize via defaults.
    if payload.get("travelType").is_some() {
        if let Ok(activity) = serde_json::from_value::<ActivityInput>(payload.clone()) {
            return Ok(estimate(&activity, factors));
        }
    }

    Err(EngineError::InvalidInput("Invalid request data".to_string()).into())
}

/// Emission payload with the two-decimal display precision the calculator
/// client renders. Full precision stays internal.
fn emission_response(result: &EmissionResult) -> serde_json::Value {
    serde_json::json!({
        "travel_emission": round2(result.travel_emission),
        "energy_emission": round2(result.energy_emission),
        "food_emission": round2(result.food_emission),
        "shopping_emission": round2(result.shopping_emission),
        "total_emission": round2(result.total_emission),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    InvalidInput(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
