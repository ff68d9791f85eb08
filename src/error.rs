//! Engine Error Taxonomy

use thiserror::Error;

/// Errors surfaced at the engine's contract boundaries.
///
/// The estimator is total over its domain and has no failure path, so the
/// only variant covers malformed request shapes reaching the selector.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed request shape (wrong type, not a valid category mapping)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
