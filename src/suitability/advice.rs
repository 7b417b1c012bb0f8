//! Recommendation Generator
//!
//! Re-examines the raw site measurements against the profile thresholds and
//! emits one severity-tagged advisory per factor, followed by a fixed
//! varieties note. Works off the raw inputs, never off the sub-scores, so a
//! factor with zero weight still gets advice.
//!
//! Output order is fixed: temperature, humidity, rainfall, elevation, soil pH,
//! latitude, varieties.

use serde::{Deserialize, Serialize};

use super::factors::{Factor, Zone};
use super::profile::ScoringProfile;
use super::site_input::{RainfallSignal, SiteInput};

/// How urgently an advisory should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

/// A human-readable advisory card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// `None` for the trailing varieties note
    pub factor: Option<Factor>,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Recommendation {
    fn new(factor: Factor, severity: Severity, title: &str, message: String) -> Self {
        Self {
            factor: Some(factor),
            severity,
            title: title.to_string(),
            message,
        }
    }
}

/// Generate the full ordered advisory list for a site
pub fn generate_recommendations(profile: &ScoringProfile, input: &SiteInput) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = Factor::ADVISORY_ORDER
        .iter()
        .map(|&factor| {
            let zone = profile.factor(factor).curve.zone(factor.curve_value(input));
            advise(factor, zone, input)
        })
        .collect();

    recommendations.push(varieties_recommendation());
    recommendations
}

fn advise(factor: Factor, zone: Zone, input: &SiteInput) -> Recommendation {
    match factor {
        Factor::Temperature => temperature_advice(zone, input.temperature_c),
        Factor::Humidity => humidity_advice(zone, input.humidity_pct),
        Factor::Rainfall => rainfall_advice(zone, &input.rainfall),
        Factor::Elevation => elevation_advice(zone, input.elevation_m),
        Factor::SoilPh => soil_ph_advice(zone, input.soil_ph),
        Factor::Latitude => latitude_advice(zone, input.latitude_deg),
    }
}

fn temperature_advice(zone: Zone, temp: f64) -> Recommendation {
    let f = Factor::Temperature;
    match zone {
        Zone::BelowViable => Recommendation::new(f, Severity::Danger, "Temperature Too Low",
            format!("{:.1}°C is below the 23°C minimum - black pepper growth will be severely affected. Consider protected cultivation.", temp)),
        Zone::BelowOptimal => Recommendation::new(f, Severity::Warning, "Suboptimal Temperature",
            format!("{:.1}°C is below the optimal range (27-28°C). Growth will be slower than ideal.", temp)),
        Zone::Optimal => Recommendation::new(f, Severity::Success, "Optimal Temperature",
            format!("Current: {:.1}°C - Excellent conditions for black pepper growth.", temp)),
        Zone::AboveOptimal => Recommendation::new(f, Severity::Warning, "Warm Temperature",
            format!("{:.1}°C is above the optimal range. Provide partial shade and mulch to limit heat stress.", temp)),
        Zone::AboveViable => Recommendation::new(f, Severity::Danger, "Temperature Too High",
            format!("{:.1}°C exceeds the 32°C maximum. Ensure adequate shade, mulching, and irrigation to prevent stress.", temp)),
    }
}

fn humidity_advice(zone: Zone, humidity: f64) -> Recommendation {
    let f = Factor::Humidity;
    match zone {
        Zone::BelowViable => Recommendation::new(f, Severity::Danger, "Humidity Too Low",
            format!("{:.0}% is below the 60% minimum - black pepper requires HIGH humidity (60-80%). Install irrigation/misting systems.", humidity)),
        Zone::BelowOptimal => Recommendation::new(f, Severity::Warning, "Low Humidity",
            format!("{:.0}% is below the optimal 70%. Black pepper thrives in HIGH humidity - increase irrigation and mulching.", humidity)),
        Zone::Optimal => Recommendation::new(f, Severity::Success, "Optimal Humidity",
            format!("Current: {:.0}% - Perfect conditions for black pepper. Monitor for fungal diseases in high humidity.", humidity)),
        Zone::AboveOptimal | Zone::AboveViable => Recommendation::new(f, Severity::Info, "Very High Humidity",
            format!("Current: {:.0}% - Good for growth but ensure proper ventilation to prevent fungal issues.", humidity)),
    }
}

fn rainfall_advice(zone: Zone, rainfall: &RainfallSignal) -> Recommendation {
    let f = Factor::Rainfall;
    let observed = match *rainfall {
        RainfallSignal::RainProbability(pct) => format!("{:.0}% chance of rain", pct),
        RainfallSignal::AnnualMm(mm) => format!("{:.0}mm/year", mm),
    };
    match zone {
        Zone::BelowViable => Recommendation::new(f, Severity::Danger, "Insufficient Rainfall",
            format!("{} - black pepper requires HIGH consistent rainfall (1500-2500mm annually). Invest in comprehensive irrigation.", observed)),
        Zone::BelowOptimal => Recommendation::new(f, Severity::Warning, "Low Rainfall",
            format!("{} is below optimal rainfall for black pepper. Supplemental irrigation essential.", observed)),
        Zone::Optimal => Recommendation::new(f, Severity::Success, "Good Rainfall Pattern",
            format!("{} - adequate consistent rainfall expected, excellent for black pepper moisture requirements.", observed)),
        Zone::AboveOptimal => Recommendation::new(f, Severity::Info, "High Rainfall",
            format!("{} - very high rainfall expected. Ensure good drainage to prevent root rot.", observed)),
        Zone::AboveViable => Recommendation::new(f, Severity::Warning, "Excessive Rainfall",
            format!("{} - waterlogging risk. Raise beds and improve drainage to protect roots from rot.", observed)),
    }
}

fn elevation_advice(zone: Zone, elevation: f64) -> Recommendation {
    let f = Factor::Elevation;
    match zone {
        Zone::BelowViable | Zone::BelowOptimal | Zone::Optimal => Recommendation::new(f, Severity::Success, "Optimal Elevation",
            format!("{:.0}m is ideal for black pepper cultivation (sea level to lowlands).", elevation)),
        Zone::AboveOptimal => Recommendation::new(f, Severity::Warning, "Upland Elevation",
            format!("{:.0}m is within the viable range (0-1000m) but cooler than ideal lowlands. Expect slower growth.", elevation)),
        Zone::AboveViable => Recommendation::new(f, Severity::Danger, "Elevation Too High",
            format!("{:.0}m is above 1000m - black pepper prefers sea level to lowlands. Growth will be limited.", elevation)),
    }
}

fn soil_ph_advice(zone: Zone, ph: f64) -> Recommendation {
    let f = Factor::SoilPh;
    match zone {
        Zone::BelowViable => Recommendation::new(f, Severity::Danger, "Soil Too Acidic",
            format!("pH {:.2} is strongly acidic. Apply agricultural lime to bring pH into the 5.5-6.5 range.", ph)),
        Zone::BelowOptimal => Recommendation::new(f, Severity::Warning, "Slightly Acidic Soil",
            format!("pH {:.2} is slightly below the ideal 5.5-6.5. A light liming will help nutrient uptake.", ph)),
        Zone::Optimal => Recommendation::new(f, Severity::Success, "Soil pH Optimal",
            format!("pH {:.2} is in the ideal range (5.5-6.5) for black pepper.", ph)),
        Zone::AboveOptimal => Recommendation::new(f, Severity::Warning, "Slightly Alkaline Soil",
            format!("pH {:.2} is slightly alkaline. Black pepper prefers acidic soil - add organic matter.", ph)),
        Zone::AboveViable => Recommendation::new(f, Severity::Danger, "Soil Too Alkaline",
            format!("pH {:.2} is too alkaline. Black pepper prefers acidic soil. Consider sulfur application.", ph)),
    }
}

fn latitude_advice(zone: Zone, latitude: f64) -> Recommendation {
    let f = Factor::Latitude;
    match zone {
        Zone::BelowViable | Zone::BelowOptimal | Zone::Optimal => Recommendation::new(f, Severity::Success, "Latitude Suitable",
            format!("Located at {:.2}° - inside the tropical belt (20°N-20°S) where black pepper thrives.", latitude)),
        Zone::AboveOptimal => Recommendation::new(f, Severity::Warning, "Latitude Marginal",
            format!("Located at {:.2}° - outside the optimal tropical zone (20°N-20°S). Expect seasonal growth checks.", latitude)),
        Zone::AboveViable => Recommendation::new(f, Severity::Danger, "Outside Cultivation Belt",
            format!("Located at {:.2}° - too far from the equator for field-grown black pepper.", latitude)),
    }
}

fn varieties_recommendation() -> Recommendation {
    Recommendation {
        factor: None,
        severity: Severity::Success,
        title: "Recommended Varieties".to_string(),
        message: "Panniyur-1, Panniyur-5, Panniyur-8 (high-yielding), or common Philippine backyard types."
            .to_string(),
    }
}
