//! Factor Scorer
//!
//! One pure function per climatic/soil factor, mapping a raw measurement to a
//! 0-100 sub-score. Each factor uses one of two response curves:
//!
//! - **Peak-and-falloff**: 100 at the optimum, linear down to 0 at the viable
//!   edge on the same side, `floor` outside the viable range.
//! - **Monotonic decay**: 100 up to `onset`, linear down to 0 at `cutoff`.
//!
//! The same curve also places a raw value into a `Zone`, which the
//! recommendation generator uses so that advice and score never disagree
//! about where a threshold lies.

use serde::{Deserialize, Serialize};

use super::profile::{FactorProfile, ScoringProfile};
use super::site_input::SiteInput;

/// Climatic/soil dimension contributing to suitability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Temperature,
    Humidity,
    Rainfall,
    Elevation,
    SoilPh,
    Latitude,
}

impl Factor {
    /// Order of `SuitabilityResult::factor_scores`
    pub const SCORING_ORDER: [Factor; 6] = [
        Factor::Temperature,
        Factor::Humidity,
        Factor::Elevation,
        Factor::Rainfall,
        Factor::SoilPh,
        Factor::Latitude,
    ];

    /// Order of `SuitabilityResult::recommendations`
    pub const ADVISORY_ORDER: [Factor; 6] = [
        Factor::Temperature,
        Factor::Humidity,
        Factor::Rainfall,
        Factor::Elevation,
        Factor::SoilPh,
        Factor::Latitude,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Factor::Temperature => "Temperature",
            Factor::Humidity => "Humidity",
            Factor::Rainfall => "Rainfall",
            Factor::Elevation => "Elevation",
            Factor::SoilPh => "Soil pH",
            Factor::Latitude => "Latitude",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Factor::Temperature => "°C",
            Factor::Humidity => "%",
            Factor::Rainfall => "% rain probability",
            Factor::Elevation => "m",
            Factor::SoilPh => "pH",
            Factor::Latitude => "°",
        }
    }

    /// Raw measurement for this factor, in the profile's canonical unit
    ///
    /// Rainfall is reported as its rain-probability equivalent; latitude keeps
    /// its sign (hemisphere) even though scoring only looks at magnitude.
    pub fn raw_value(&self, input: &SiteInput) -> f64 {
        match self {
            Factor::Temperature => input.temperature_c,
            Factor::Humidity => input.humidity_pct,
            Factor::Rainfall => input.rainfall.rain_probability_equivalent(),
            Factor::Elevation => input.elevation_m,
            Factor::SoilPh => input.soil_ph,
            Factor::Latitude => input.latitude_deg,
        }
    }

    /// Value fed to the response curve
    pub fn curve_value(&self, input: &SiteInput) -> f64 {
        match self {
            Factor::Latitude => input.latitude_deg.abs(),
            _ => self.raw_value(input),
        }
    }
}

/// Shape of a factor's score as a function of its raw value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ResponseCurve {
    PeakFalloff {
        min: f64,
        optimal: f64,
        max: f64,
        /// Score outside `[min, max]`
        ///
        /// A non-zero floor makes the curve jump from 0 at the edge to
        /// `floor` just beyond it, so a value far outside the range can
        /// outscore one just inside. Profiles that set it accept that
        /// inversion; the canonical profile keeps every floor at 0.
        #[serde(default)]
        floor: f64,
        /// Sub-range reported as ideal by the advice
        optimal_low: f64,
        optimal_high: f64,
    },
    MonotonicDecay {
        onset: f64,
        cutoff: f64,
        /// Values at or below this are reported as ideal by the advice
        optimal_max: f64,
    },
}

/// Where a raw value sits relative to the viable range and the optimal band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    BelowViable,
    BelowOptimal,
    Optimal,
    AboveOptimal,
    AboveViable,
}

impl ResponseCurve {
    /// Sub-score in [0, 100]
    pub fn score(&self, value: f64) -> f64 {
        match *self {
            ResponseCurve::PeakFalloff { min, optimal, max, floor, .. } => {
                if value < min || value > max {
                    return floor;
                }
                let edge = if value <= optimal { optimal - min } else { max - optimal };
                if edge <= 0.0 {
                    // Optimum sits on the viable edge and value == optimum
                    return 100.0;
                }
                let distance = (value - optimal).abs();
                (100.0 * (1.0 - distance / edge)).clamp(0.0, 100.0)
            }
            ResponseCurve::MonotonicDecay { onset, cutoff, .. } => {
                if value <= onset {
                    100.0
                } else if value >= cutoff {
                    0.0
                } else {
                    100.0 * (cutoff - value) / (cutoff - onset)
                }
            }
        }
    }

    pub fn zone(&self, value: f64) -> Zone {
        match *self {
            ResponseCurve::PeakFalloff { min, max, optimal_low, optimal_high, .. } => {
                if value < min {
                    Zone::BelowViable
                } else if value < optimal_low {
                    Zone::BelowOptimal
                } else if value <= optimal_high {
                    Zone::Optimal
                } else if value <= max {
                    Zone::AboveOptimal
                } else {
                    Zone::AboveViable
                }
            }
            ResponseCurve::MonotonicDecay { cutoff, optimal_max, .. } => {
                if value <= optimal_max {
                    Zone::Optimal
                } else if value <= cutoff {
                    Zone::AboveOptimal
                } else {
                    Zone::AboveViable
                }
            }
        }
    }
}

/// Score of one factor for one site
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub raw_value: f64,
    /// 0-100
    pub sub_score: f64,
    pub weight: f64,
}

impl FactorScore {
    /// Share of the composite score contributed by this factor
    pub fn contribution(&self) -> f64 {
        self.sub_score * self.weight
    }
}

/// Score a single factor
pub fn score_factor(factor: Factor, profile: &FactorProfile, input: &SiteInput) -> FactorScore {
    FactorScore {
        factor,
        raw_value: factor.raw_value(input),
        sub_score: profile.curve.score(factor.curve_value(input)),
        weight: profile.weight,
    }
}

/// Score every factor, in `Factor::SCORING_ORDER`
pub fn score_factors(profile: &ScoringProfile, input: &SiteInput) -> Vec<FactorScore> {
    Factor::SCORING_ORDER
        .iter()
        .map(|&factor| score_factor(factor, profile.factor(factor), input))
        .collect()
}
