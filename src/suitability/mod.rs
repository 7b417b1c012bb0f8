//! Site Suitability Engine for Black Pepper
//!
//! Scores a location's weather, elevation, rainfall, soil pH and latitude
//! against black pepper (*Piper nigrum*) growing requirements and produces a
//! 0-100 score, a rating and ordered growing advice.
//!
//! ## Architecture
//! - `site_input.rs` - SiteInput, partial readings and fallback policy
//! - `profile.rs` - Thresholds and weights (canonical + JSON-loaded)
//! - `factors.rs` - Per-factor response curves and sub-scores
//! - `composite.rs` - Weighted overall score
//! - `rating.rs` - Excellent/Good/Fair/Poor classification
//! - `advice.rs` - Severity-tagged recommendations from raw inputs
//! - `assessment.rs` - SuitabilityResult and the public entry points
//! - `batch.rs` - Parallel evaluation of many sites
//! - `sample_sites.rs` - Hardcoded reference locations

pub mod site_input;
pub mod profile;
pub mod factors;
pub mod composite;
pub mod rating;
pub mod advice;
pub mod assessment;
pub mod batch;
pub mod sample_sites;

// Re-export public API
pub use site_input::{FallbackDefaults, RainfallSignal, ResolvedSite, SiteInput, SiteReadings};
pub use profile::{FactorProfile, ScoringProfile, ScoringProfileBuilder};
pub use factors::{Factor, FactorScore, ResponseCurve, Zone};
pub use rating::{Rating, RatingDisplay};
pub use advice::{Recommendation, Severity};
pub use assessment::{compute_suitability, compute_suitability_with, SuitabilityResult};
pub use batch::{evaluate_batch, BatchSummary};
pub use sample_sites::{find_sample_site, sample_sites, SampleSite};
