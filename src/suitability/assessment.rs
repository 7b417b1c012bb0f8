//! Suitability Assessment
//!
//! Composes the factor scorer, composite scorer, rating classifier and
//! recommendation generator into one `SuitabilityResult`.

use serde::Serialize;

use super::advice::{generate_recommendations, Recommendation};
use super::composite::composite_score;
use super::factors::{score_factors, FactorScore};
use super::profile::ScoringProfile;
use super::rating::Rating;
use super::site_input::SiteInput;
use crate::error::InvalidInputError;

/// Complete suitability evaluation for one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuitabilityResult {
    /// 0-100
    pub overall_score: u8,
    pub rating: Rating,
    /// In `Factor::SCORING_ORDER`
    pub factor_scores: Vec<FactorScore>,
    /// In `Factor::ADVISORY_ORDER`, then the varieties note
    pub recommendations: Vec<Recommendation>,
}

/// Evaluate a site against the canonical black pepper profile
pub fn compute_suitability(input: &SiteInput) -> Result<SuitabilityResult, InvalidInputError> {
    compute_suitability_with(&ScoringProfile::canonical(), input)
}

/// Evaluate a site against a caller-supplied profile
///
/// Validation happens first; an invalid measurement aborts with no partial
/// result. `ScoringProfile` can only be built through validating
/// constructors, so the weights here always sum to 1.0.
pub fn compute_suitability_with(
    profile: &ScoringProfile,
    input: &SiteInput,
) -> Result<SuitabilityResult, InvalidInputError> {
    input.validate()?;

    let factor_scores = score_factors(profile, input);
    let overall_score = composite_score(&factor_scores);
    let rating = Rating::from_score(overall_score);
    let recommendations = generate_recommendations(profile, input);

    tracing::debug!(
        profile = profile.name(),
        overall_score,
        rating = rating.display_text(),
        "evaluated site"
    );

    Ok(SuitabilityResult {
        overall_score,
        rating,
        factor_scores,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suitability::advice::Severity;
    use crate::suitability::factors::Factor;
    use crate::suitability::site_input::RainfallSignal;

    fn all_optimal() -> SiteInput {
        SiteInput::new(27.5, 70.0, 0.0, RainfallSignal::RainProbability(70.0), 6.0, 10.0)
    }

    fn all_adverse() -> SiteInput {
        SiteInput::new(40.0, 30.0, 2000.0, RainfallSignal::RainProbability(10.0), 8.5, 45.0)
    }

    #[test]
    fn test_all_optimal_site() {
        let result = compute_suitability(&all_optimal()).unwrap();
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.rating, Rating::Excellent);
        assert!(result.recommendations.iter().all(|r| r.severity == Severity::Success));
    }

    #[test]
    fn test_all_adverse_site() {
        let result = compute_suitability(&all_adverse()).unwrap();
        assert_eq!(result.overall_score, 0);
        assert_eq!(result.rating, Rating::Poor);
        assert!(result
            .recommendations
            .iter()
            .filter(|r| r.factor.is_some())
            .all(|r| matches!(r.severity, Severity::Danger | Severity::Warning)));
    }

    #[test]
    fn test_nan_temperature_rejected() {
        let input = SiteInput { temperature_c: f64::NAN, ..all_optimal() };
        let err = compute_suitability(&input).unwrap_err();
        assert!(matches!(err, InvalidInputError::NonFinite { field: "temperature_c", .. }));
    }

    #[test]
    fn test_factor_scores_carry_profile_weights() {
        let result = compute_suitability(&all_optimal()).unwrap();
        let temperature = result
            .factor_scores
            .iter()
            .find(|s| s.factor == Factor::Temperature)
            .unwrap();
        assert_eq!(temperature.weight, 0.35);
        assert_eq!(result.factor_scores.len(), 6);
        assert_eq!(result.recommendations.len(), 7);
    }

    #[test]
    fn test_custom_profile_changes_score_only_through_weights() {
        let profile = ScoringProfile::builder()
            .weight(Factor::Temperature, 0.25)
            .weight(Factor::SoilPh, 0.10)
            .build()
            .unwrap();

        let input = SiteInput { soil_ph: 8.5, ..all_optimal() };
        let canonical = compute_suitability(&input).unwrap();
        let custom = compute_suitability_with(&profile, &input).unwrap();

        assert_eq!(canonical.overall_score, 100);
        assert_eq!(custom.overall_score, 90);
        assert_eq!(canonical.recommendations, custom.recommendations);
    }

    #[test]
    fn test_overweighted_profile_never_reaches_scoring() {
        let built = ScoringProfile::builder().weight(Factor::Temperature, 5.0).build();
        assert!(built.is_err());

        let mut value = serde_json::to_value(ScoringProfile::canonical()).unwrap();
        value["temperature"]["weight"] = serde_json::json!(5.0);
        assert!(serde_json::from_value::<ScoringProfile>(value).is_err());
    }

    #[test]
    fn test_composite_bounded_for_any_valid_profile() {
        let profile = ScoringProfile::builder()
            .weight(Factor::Temperature, 0.0)
            .weight(Factor::Humidity, 0.0)
            .weight(Factor::Elevation, 0.0)
            .weight(Factor::Rainfall, 0.0)
            .weight(Factor::Latitude, 1.0)
            .build()
            .unwrap();
        let result = compute_suitability_with(&profile, &all_optimal()).unwrap();
        assert_eq!(result.overall_score, 100);
        let total: f64 = result.factor_scores.iter().map(|s| s.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
