//! Sample sites
//!
//! Hardcoded reference locations used by the demo binary, the API's sample
//! endpoint and tests. Values are typical current-weather readings for each
//! place, not long-term climate normals.

use serde::Serialize;

use super::site_input::{RainfallSignal, SiteInput};

/// A named reference location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSite {
    /// Display name (e.g., "Manila, Philippines")
    pub name: &'static str,
    /// Lookup code (e.g., "manila")
    pub code: &'static str,
    pub longitude_deg: f64,
    pub input: SiteInput,
}

/// Manila: default map centre, humid lowland
pub fn manila() -> SampleSite {
    SampleSite {
        name: "Manila, Philippines",
        code: "manila",
        longitude_deg: 120.9842,
        input: SiteInput::new(28.0, 75.0, 10.0, RainfallSignal::RainProbability(70.0), 6.0, 14.5994),
    }
}

/// Kozhikode: Malabar coast pepper belt, very wet monsoon climate
pub fn kozhikode() -> SampleSite {
    SampleSite {
        name: "Kozhikode, Kerala, India",
        code: "kozhikode",
        longitude_deg: 75.7804,
        input: SiteInput::new(27.0, 78.0, 20.0, RainfallSignal::AnnualMm(3200.0), 5.6, 11.2588),
    }
}

/// Baguio: cool, misty highland
pub fn baguio() -> SampleSite {
    SampleSite {
        name: "Baguio, Philippines",
        code: "baguio",
        longitude_deg: 120.5960,
        input: SiteInput::new(19.5, 85.0, 1500.0, RainfallSignal::RainProbability(80.0), 5.2, 16.4023),
    }
}

/// London: temperate control
pub fn london() -> SampleSite {
    SampleSite {
        name: "London, UK",
        code: "london",
        longitude_deg: -0.1276,
        input: SiteInput::new(11.0, 78.0, 20.0, RainfallSignal::RainProbability(45.0), 6.8, 51.5074),
    }
}

/// Get all sample sites
pub fn sample_sites() -> Vec<SampleSite> {
    vec![manila(), kozhikode(), baguio(), london()]
}

/// Look up a sample site by code (case-insensitive)
pub fn find_sample_site(code: &str) -> Option<SampleSite> {
    let code = code.trim().to_lowercase();
    sample_sites().into_iter().find(|s| s.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suitability::assessment::compute_suitability;
    use crate::suitability::rating::Rating;

    #[test]
    fn test_sample_sites_are_valid() {
        for site in sample_sites() {
            assert!(site.input.validate().is_ok(), "{} failed validation", site.name);
        }
    }

    #[test]
    fn test_sample_site_ratings() {
        let rating = |site: SampleSite| compute_suitability(&site.input).unwrap().rating;
        assert_eq!(rating(manila()), Rating::Excellent);
        // 3200 mm sits above the viable rainfall band, costing the full 15 points
        assert_eq!(rating(kozhikode()), Rating::Fair);
        assert_eq!(rating(baguio()), Rating::Poor);
        assert_eq!(rating(london()), Rating::Poor);
    }

    #[test]
    fn test_find_sample_site() {
        assert_eq!(find_sample_site("Manila").map(|s| s.code), Some("manila"));
        assert!(find_sample_site("atlantis").is_none());
    }
}
