//! Composite Scorer
//!
//! Weighted sum of factor sub-scores, rounded to an integer 0-100.

use super::factors::FactorScore;

/// Overall suitability score
///
/// Weights sum to 1.0 and sub-scores are bounded, so the sum is already in
/// [0, 100]; the clamp only absorbs floating-point drift.
pub fn composite_score(scores: &[FactorScore]) -> u8 {
    let total: f64 = scores.iter().map(FactorScore::contribution).sum();
    total.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suitability::factors::Factor;

    fn score(factor: Factor, sub_score: f64, weight: f64) -> FactorScore {
        FactorScore { factor, raw_value: 0.0, sub_score, weight }
    }

    #[test]
    fn test_weighted_sum() {
        let scores = [
            score(Factor::Temperature, 100.0, 0.35),
            score(Factor::Humidity, 50.0, 0.30),
            score(Factor::Elevation, 0.0, 0.20),
            score(Factor::Rainfall, 50.0, 0.15),
        ];
        // 35 + 15 + 0 + 7.5 = 57.5
        assert_eq!(composite_score(&scores), 58);
    }

    #[test]
    fn test_all_perfect_is_100() {
        let scores = [
            score(Factor::Temperature, 100.0, 0.35),
            score(Factor::Humidity, 100.0, 0.30),
            score(Factor::Elevation, 100.0, 0.20),
            score(Factor::Rainfall, 100.0, 0.15),
        ];
        assert_eq!(composite_score(&scores), 100);
    }

    #[test]
    fn test_drift_is_clamped() {
        let scores = [score(Factor::Temperature, 100.0, 1.000001)];
        assert_eq!(composite_score(&scores), 100);
        assert_eq!(composite_score(&[]), 0);
    }
}
