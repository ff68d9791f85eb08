//! Carbon-Footprint Estimation and Recommendation Engine
//!
//! Two pure components evaluated in sequence: the emission estimator maps
//! an activity record to a per-category CO₂e estimate, and the
//! recommendation selector cleans and de-duplicates per-category tip
//! candidates from an upstream tip source. Both are stateless; emission
//! factors, cleaning thresholds, and tip pools are passed in explicitly.
//!
//! The optional `api` feature adds the Axum HTTP surface (`/calculate`,
//! `/recommend`, `/health`) through which the calculator client consumes
//! the engine.

pub mod activity;
pub mod error;
pub mod estimator;
pub mod factors;
pub mod recommend;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use activity::{ActivityInput, Category, EmissionResult, TravelMode};
pub use error::EngineError;
pub use estimator::estimate;
pub use factors::{CleaningRules, EmissionFactors};
pub use recommend::{select, RecommendationBundle, StaticTipSource, TipCandidates, TipSource};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
