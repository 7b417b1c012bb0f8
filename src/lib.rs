//! Black Pepper Site Suitability Engine
//!
//! Scores how well a location suits black pepper (*Piper nigrum*) cultivation
//! from its weather, elevation, rainfall, soil pH and latitude.
//!
//! - `suitability/`: factor scoring, composite score, rating, recommendations
//! - `error`: input validation errors
//! - `api_server`: JSON API over the engine (feature `api`)
//!
//! Every evaluation is a pure function of its `SiteInput`; callers may run as
//! many as they like concurrently.

pub mod error;
pub mod suitability;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::InvalidInputError;
pub use suitability::{
    compute_suitability, compute_suitability_with, evaluate_batch, BatchSummary, Factor,
    FactorScore, FallbackDefaults, RainfallSignal, Rating, Recommendation, ScoringProfile,
    ScoringProfileBuilder, Severity, SiteInput, SiteReadings, SuitabilityResult,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
