//! Batch Evaluation
//!
//! Evaluates many sites at once (e.g. every marker on a heat map). Each site
//! is independent, so the work is spread across rayon's thread pool.

use rayon::prelude::*;
use serde::Serialize;

use super::assessment::{compute_suitability_with, SuitabilityResult};
use super::profile::ScoringProfile;
use super::site_input::SiteInput;
use crate::error::InvalidInputError;

/// Score at or above which a site counts as suitable (Good or better)
pub const SUITABLE_SCORE: u8 = 60;

/// Evaluate every input in parallel, preserving input order
pub fn evaluate_batch(
    profile: &ScoringProfile,
    inputs: &[SiteInput],
) -> Vec<Result<SuitabilityResult, InvalidInputError>> {
    inputs
        .par_iter()
        .map(|input| compute_suitability_with(profile, input))
        .collect()
}

/// Aggregate statistics over a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub evaluated: usize,
    pub failed: usize,
    /// Rounded mean of successful scores, 0 when none succeeded
    pub average_score: u8,
    pub suitable_count: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<SuitabilityResult, InvalidInputError>]) -> Self {
        let scores: Vec<u8> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|r| r.overall_score)
            .collect();

        let average_score = if scores.is_empty() {
            0
        } else {
            let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
            (f64::from(sum) / scores.len() as f64).round() as u8
        };

        Self {
            total: results.len(),
            evaluated: scores.len(),
            failed: results.len() - scores.len(),
            average_score,
            suitable_count: scores.iter().filter(|&&s| s >= SUITABLE_SCORE).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suitability::site_input::RainfallSignal;

    fn site(temp: f64) -> SiteInput {
        SiteInput::new(temp, 70.0, 0.0, RainfallSignal::RainProbability(70.0), 6.0, 10.0)
    }

    #[test]
    fn test_order_preserved() {
        let profile = ScoringProfile::canonical();
        let inputs: Vec<SiteInput> = (0..200).map(|i| site(23.0 + (i % 10) as f64)).collect();
        let results = evaluate_batch(&profile, &inputs);

        assert_eq!(results.len(), inputs.len());
        for (input, result) in inputs.iter().zip(&results) {
            let expected = compute_suitability_with(&profile, input).unwrap();
            assert_eq!(result.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let profile = ScoringProfile::canonical();
        let inputs = vec![site(27.5), site(f64::NAN), site(40.0)];
        let results = evaluate_batch(&profile, &inputs);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.evaluated, 2);
        assert_eq!(summary.failed, 1);
        // 100 and 65 (temperature contributes nothing at 40°C)
        assert_eq!(summary.average_score, 83);
        assert_eq!(summary.suitable_count, 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_score, 0);
        assert_eq!(summary.suitable_count, 0);
    }
}
