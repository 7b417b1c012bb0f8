//! Scoring Profile
//!
//! Thresholds and weights for every factor, held as data. The canonical
//! profile below is the single source of truth used by the factor scorer and
//! the recommendation generator alike. Alternative profiles come from JSON
//! or from `ScoringProfileBuilder`; both validate, so every `ScoringProfile`
//! in existence has non-negative weights summing to 1.0 and ordered
//! thresholds.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::factors::{Factor, ResponseCurve};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Curve and weight for a single factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorProfile {
    pub curve: ResponseCurve,
    pub weight: f64,
}

/// Thresholds and weights for all six factors
///
/// Fields are private; deserialization goes through `validate()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileDef")]
pub struct ScoringProfile {
    name: String,
    temperature: FactorProfile,
    humidity: FactorProfile,
    elevation: FactorProfile,
    rainfall: FactorProfile,
    soil_ph: FactorProfile,
    latitude: FactorProfile,
}

/// Unchecked wire form of `ScoringProfile`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileDef {
    name: String,
    temperature: FactorProfile,
    humidity: FactorProfile,
    elevation: FactorProfile,
    rainfall: FactorProfile,
    soil_ph: FactorProfile,
    latitude: FactorProfile,
}

impl TryFrom<ProfileDef> for ScoringProfile {
    type Error = anyhow::Error;

    fn try_from(def: ProfileDef) -> Result<Self> {
        let profile = ScoringProfile {
            name: def.name,
            temperature: def.temperature,
            humidity: def.humidity,
            elevation: def.elevation,
            rainfall: def.rainfall,
            soil_ph: def.soil_ph,
            latitude: def.latitude,
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ScoringProfile {
    /// Black pepper (*Piper nigrum*) lowland profile
    ///
    /// Soil pH and latitude are scored and reported but carry no weight.
    /// Rainfall outside 40-90% scores 0, same as the other peaked factors.
    pub fn canonical() -> Self {
        Self {
            name: "black_pepper_canonical".to_string(),
            temperature: FactorProfile {
                curve: ResponseCurve::PeakFalloff {
                    min: 23.0,
                    optimal: 27.5,
                    max: 32.0,
                    floor: 0.0,
                    optimal_low: 25.0,
                    optimal_high: 30.0,
                },
                weight: 0.35,
            },
            humidity: FactorProfile {
                curve: ResponseCurve::PeakFalloff {
                    min: 60.0,
                    optimal: 70.0,
                    max: 80.0,
                    floor: 0.0,
                    optimal_low: 70.0,
                    optimal_high: 80.0,
                },
                weight: 0.30,
            },
            elevation: FactorProfile {
                curve: ResponseCurve::MonotonicDecay {
                    onset: 0.0,
                    cutoff: 1000.0,
                    optimal_max: 300.0,
                },
                weight: 0.20,
            },
            rainfall: FactorProfile {
                curve: ResponseCurve::PeakFalloff {
                    min: 40.0,
                    optimal: 70.0,
                    max: 90.0,
                    floor: 0.0,
                    optimal_low: 60.0,
                    optimal_high: 80.0,
                },
                weight: 0.15,
            },
            soil_ph: FactorProfile {
                curve: ResponseCurve::PeakFalloff {
                    min: 5.0,
                    optimal: 6.0,
                    max: 7.0,
                    floor: 0.0,
                    optimal_low: 5.5,
                    optimal_high: 6.5,
                },
                weight: 0.0,
            },
            latitude: FactorProfile {
                curve: ResponseCurve::MonotonicDecay {
                    onset: 20.0,
                    cutoff: 30.0,
                    optimal_max: 20.0,
                },
                weight: 0.0,
            },
        }
    }

    /// Load and validate a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring profile: {:?}", path))?;

        let profile = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid scoring profile: {:?}", path))?;

        tracing::info!(name = profile.name(), "loaded scoring profile from {:?}", path);
        Ok(profile)
    }

    /// Parse a profile; thresholds and weights are validated during parsing
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).with_context(|| "Failed to parse scoring profile JSON")
    }

    /// Start a modified copy of the canonical profile
    pub fn builder() -> ScoringProfileBuilder {
        ScoringProfileBuilder { profile: Self::canonical() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factor(&self, factor: Factor) -> &FactorProfile {
        match factor {
            Factor::Temperature => &self.temperature,
            Factor::Humidity => &self.humidity,
            Factor::Rainfall => &self.rainfall,
            Factor::Elevation => &self.elevation,
            Factor::SoilPh => &self.soil_ph,
            Factor::Latitude => &self.latitude,
        }
    }

    fn factor_mut(&mut self, factor: Factor) -> &mut FactorProfile {
        match factor {
            Factor::Temperature => &mut self.temperature,
            Factor::Humidity => &mut self.humidity,
            Factor::Rainfall => &mut self.rainfall,
            Factor::Elevation => &mut self.elevation,
            Factor::SoilPh => &mut self.soil_ph,
            Factor::Latitude => &mut self.latitude,
        }
    }

    pub fn total_weight(&self) -> f64 {
        Factor::SCORING_ORDER
            .iter()
            .map(|&f| self.factor(f).weight)
            .sum()
    }

    /// Check weights and thresholds are coherent
    ///
    /// Weights must be non-negative and sum to 1.0, so the composite of
    /// bounded sub-scores is itself bounded to [0, 100].
    pub fn validate(&self) -> Result<()> {
        for &factor in Factor::SCORING_ORDER.iter() {
            let fp = self.factor(factor);
            let name = factor.display_name();

            if !fp.weight.is_finite() || fp.weight < 0.0 {
                anyhow::bail!("{} weight must be a non-negative number (got {})", name, fp.weight);
            }
            validate_curve(name, &fp.curve)?;
        }

        let total = self.total_weight();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            anyhow::bail!("Factor weights must sum to 1.0 (got {})", total);
        }
        Ok(())
    }
}

/// Edits a profile; nothing is checked until `build()`
#[derive(Debug, Clone)]
pub struct ScoringProfileBuilder {
    profile: ScoringProfile,
}

impl ScoringProfileBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = name.into();
        self
    }

    pub fn weight(mut self, factor: Factor, weight: f64) -> Self {
        self.profile.factor_mut(factor).weight = weight;
        self
    }

    pub fn curve(mut self, factor: Factor, curve: ResponseCurve) -> Self {
        self.profile.factor_mut(factor).curve = curve;
        self
    }

    pub fn build(self) -> Result<ScoringProfile> {
        self.profile.validate()?;
        Ok(self.profile)
    }
}

fn validate_curve(name: &str, curve: &ResponseCurve) -> Result<()> {
    match *curve {
        ResponseCurve::PeakFalloff { min, optimal, max, floor, optimal_low, optimal_high } => {
            let all = [min, optimal, max, floor, optimal_low, optimal_high];
            if all.iter().any(|v| !v.is_finite()) {
                anyhow::bail!("{} thresholds must be finite", name);
            }
            if !(min <= optimal && optimal <= max) || min == max {
                anyhow::bail!("{} requires min <= optimal <= max with min < max", name);
            }
            if !(min <= optimal_low && optimal_low <= optimal_high && optimal_high <= max) {
                anyhow::bail!("{} optimal band must lie inside [{}, {}]", name, min, max);
            }
            if !(0.0..=100.0).contains(&floor) {
                anyhow::bail!("{} floor must be within [0, 100] (got {})", name, floor);
            }
        }
        ResponseCurve::MonotonicDecay { onset, cutoff, optimal_max } => {
            if [onset, cutoff, optimal_max].iter().any(|v| !v.is_finite()) {
                anyhow::bail!("{} thresholds must be finite", name);
            }
            if onset >= cutoff {
                anyhow::bail!("{} requires onset < cutoff", name);
            }
            if optimal_max > cutoff {
                anyhow::bail!("{} optimal_max must not exceed cutoff {}", name, cutoff);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_canonical_profile_is_valid() {
        let profile = ScoringProfile::canonical();
        assert!(profile.validate().is_ok());
        assert_relative_eq!(profile.total_weight(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_json_round_trip() {
        let profile = ScoringProfile::canonical();
        let json = serde_json::to_string_pretty(&profile).unwrap();
        assert!(json.contains(r#""shape": "peak_falloff""#));
        let back = ScoringProfile::from_json_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_reweighted_profile_accepted() {
        let profile = ScoringProfile::builder()
            .name("six_factor")
            .weight(Factor::Temperature, 0.25)
            .weight(Factor::Humidity, 0.20)
            .weight(Factor::Elevation, 0.15)
            .weight(Factor::Rainfall, 0.15)
            .weight(Factor::SoilPh, 0.15)
            .weight(Factor::Latitude, 0.10)
            .build()
            .unwrap();
        assert_eq!(profile.name(), "six_factor");
        assert_relative_eq!(profile.total_weight(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let err = ScoringProfile::builder()
            .weight(Factor::SoilPh, 0.1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));

        let err = ScoringProfile::builder()
            .weight(Factor::Temperature, 5.0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = ScoringProfile::builder()
            .weight(Factor::Latitude, -0.1)
            .weight(Factor::SoilPh, 0.1)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let result = ScoringProfile::builder()
            .curve(
                Factor::Temperature,
                ResponseCurve::PeakFalloff {
                    min: 32.0,
                    optimal: 27.5,
                    max: 23.0,
                    floor: 0.0,
                    optimal_low: 25.0,
                    optimal_high: 30.0,
                },
            )
            .build();
        assert!(result.is_err());

        let result = ScoringProfile::builder()
            .curve(
                Factor::Elevation,
                ResponseCurve::MonotonicDecay { onset: 1000.0, cutoff: 0.0, optimal_max: 0.0 },
            )
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_band_outside_viable_range_rejected() {
        let result = ScoringProfile::builder()
            .curve(
                Factor::Humidity,
                ResponseCurve::PeakFalloff {
                    min: 60.0,
                    optimal: 70.0,
                    max: 80.0,
                    floor: 0.0,
                    optimal_low: 70.0,
                    optimal_high: 95.0,
                },
            )
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_deserializing_directly_still_validates() {
        let mut value = serde_json::to_value(ScoringProfile::canonical()).unwrap();
        value["temperature"]["weight"] = serde_json::json!(5.0);

        let err = serde_json::from_value::<ScoringProfile>(value.clone()).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
        assert!(ScoringProfile::from_json_str(&value.to_string()).is_err());
    }

    #[test]
    fn test_rainfall_floor_is_opt_in() {
        let rainfall = ScoringProfile::canonical().factor(Factor::Rainfall).curve;
        assert_eq!(rainfall.score(10.0), 0.0);

        let lenient = ScoringProfile::builder()
            .curve(
                Factor::Rainfall,
                ResponseCurve::PeakFalloff {
                    min: 40.0,
                    optimal: 70.0,
                    max: 90.0,
                    floor: 50.0,
                    optimal_low: 60.0,
                    optimal_high: 80.0,
                },
            )
            .build()
            .unwrap();
        assert_eq!(lenient.factor(Factor::Rainfall).curve.score(10.0), 50.0);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let mut value = serde_json::to_value(ScoringProfile::canonical()).unwrap();
        value["wind"] = serde_json::json!({});
        assert!(ScoringProfile::from_json_str(&value.to_string()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScoringProfile::load(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read scoring profile"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "pepper_profile_{}.json",
            std::process::id()
        ));
        fs::write(&path, serde_json::to_string(&ScoringProfile::canonical()).unwrap()).unwrap();
        let profile = ScoringProfile::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(profile, ScoringProfile::canonical());
    }
}
