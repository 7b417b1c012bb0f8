//! Rating Classifier
//!
//! Four-tier threshold lookup from the composite score, with the display
//! metadata (colour, icon, description) shown on score badges and rating chips.

use serde::{Deserialize, Serialize};

/// Ordinal suitability rating, worst first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    /// Contiguous bands in ascending order: (rating, lowest score, highest score)
    pub const BANDS: [(Rating, u8, u8); 4] = [
        (Rating::Poor, 0, 39),
        (Rating::Fair, 40, 59),
        (Rating::Good, 60, 79),
        (Rating::Excellent, 80, 100),
    ];

    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Rating::Excellent
        } else if score >= 60 {
            Rating::Good
        } else if score >= 40 {
            Rating::Fair
        } else {
            Rating::Poor
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Rating::Excellent => "#27AE60",
            Rating::Good => "#F39C12",
            Rating::Fair => "#E67E22",
            Rating::Poor => "#E74C3C",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Rating::Excellent => "✓✓",
            Rating::Good => "✓",
            Rating::Fair => "△",
            Rating::Poor => "✗",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rating::Excellent => "Highly suitable for black pepper cultivation",
            Rating::Good => "Suitable with some considerations",
            Rating::Fair => "Marginal - additional inputs may be needed",
            Rating::Poor => "Not recommended for black pepper",
        }
    }

    pub fn display(&self) -> RatingDisplay {
        RatingDisplay {
            rating: *self,
            label: self.display_text(),
            color: self.color(),
            icon: self.icon(),
            description: self.description(),
        }
    }
}

/// Everything a rating chip needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingDisplay {
    pub rating: Rating,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}
