//! Site Input
//!
//! The measurements describing one location, plus the partial-reading type
//! used by data-acquisition callers and the explicit fallback policy that
//! turns partial readings into a complete `SiteInput`.

use serde::{Deserialize, Serialize};

use crate::error::{check_domain, InvalidInputError};

// ============================================================================
// Physical Domains
// ============================================================================

pub const TEMPERATURE_DOMAIN: (f64, f64) = (-90.0, 60.0);
pub const HUMIDITY_DOMAIN: (f64, f64) = (0.0, 100.0);
pub const ELEVATION_DOMAIN: (f64, f64) = (-500.0, 9000.0);
pub const RAIN_PROBABILITY_DOMAIN: (f64, f64) = (0.0, 100.0);
pub const ANNUAL_RAINFALL_DOMAIN: (f64, f64) = (0.0, 30000.0);
pub const SOIL_PH_DOMAIN: (f64, f64) = (0.0, 14.0);
pub const LATITUDE_DOMAIN: (f64, f64) = (-90.0, 90.0);

/// Annual rainfall (mm) → rain-probability equivalent (%).
///
/// 1000 mm sits on the lower viable edge (40%), 2000 mm on the optimum (70%),
/// 3000 mm on the upper viable edge (90%). Linear between knots, flat above
/// the last one.
const ANNUAL_MM_TO_PROBABILITY: [(f64, f64); 5] = [
    (0.0, 0.0),
    (1000.0, 40.0),
    (2000.0, 70.0),
    (3000.0, 90.0),
    (4000.0, 100.0),
];

/// Rainfall measurement in one of the two units the callers can supply
///
/// Rain probability is the canonical unit; annual totals are converted with
/// `rain_probability_equivalent()` before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallSignal {
    /// Chance of rain from a current-weather feed, in percent
    RainProbability(f64),
    /// Long-term annual precipitation, in millimetres
    AnnualMm(f64),
}

impl RainfallSignal {
    pub fn rain_probability_equivalent(&self) -> f64 {
        match *self {
            RainfallSignal::RainProbability(pct) => pct,
            RainfallSignal::AnnualMm(mm) => annual_mm_to_probability(mm),
        }
    }

    fn validate(&self) -> Result<(), InvalidInputError> {
        match *self {
            RainfallSignal::RainProbability(pct) => {
                let (min, max) = RAIN_PROBABILITY_DOMAIN;
                check_domain("rainfall.rain_probability", pct, min, max)?;
            }
            RainfallSignal::AnnualMm(mm) => {
                let (min, max) = ANNUAL_RAINFALL_DOMAIN;
                check_domain("rainfall.annual_mm", mm, min, max)?;
            }
        }
        Ok(())
    }
}

fn annual_mm_to_probability(mm: f64) -> f64 {
    for pair in ANNUAL_MM_TO_PROBABILITY.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if mm <= x1 {
            return y0 + (mm - x0).max(0.0) / (x1 - x0) * (y1 - y0);
        }
    }
    ANNUAL_MM_TO_PROBABILITY[ANNUAL_MM_TO_PROBABILITY.len() - 1].1
}

/// Complete set of measurements for one location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteInput {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub elevation_m: f64,
    pub rainfall: RainfallSignal,
    pub soil_ph: f64,
    pub latitude_deg: f64,
}

impl SiteInput {
    pub fn new(
        temperature_c: f64,
        humidity_pct: f64,
        elevation_m: f64,
        rainfall: RainfallSignal,
        soil_ph: f64,
        latitude_deg: f64,
    ) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            elevation_m,
            rainfall,
            soil_ph,
            latitude_deg,
        }
    }

    /// Reject non-finite or physically impossible measurements
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let (min, max) = TEMPERATURE_DOMAIN;
        check_domain("temperature_c", self.temperature_c, min, max)?;
        let (min, max) = HUMIDITY_DOMAIN;
        check_domain("humidity_pct", self.humidity_pct, min, max)?;
        let (min, max) = ELEVATION_DOMAIN;
        check_domain("elevation_m", self.elevation_m, min, max)?;
        self.rainfall.validate()?;
        let (min, max) = SOIL_PH_DOMAIN;
        check_domain("soil_ph", self.soil_ph, min, max)?;
        let (min, max) = LATITUDE_DOMAIN;
        check_domain("latitude_deg", self.latitude_deg, min, max)?;
        Ok(())
    }
}

// ============================================================================
// Partial Readings & Fallbacks
// ============================================================================

/// Measurements as gathered from weather/elevation/soil lookups, any of which
/// may have failed
///
/// Unknown keys are rejected so a misspelled field is never mistaken for a
/// failed lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteReadings {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub elevation_m: Option<f64>,
    pub rainfall: Option<RainfallSignal>,
    pub soil_ph: Option<f64>,
    pub latitude_deg: Option<f64>,
}

/// Values substituted for failed lookups
///
/// Latitude has no fallback: it always comes from the location being queried.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackDefaults {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub elevation_m: f64,
    pub rainfall: RainfallSignal,
    pub soil_ph: f64,
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        Self {
            temperature_c: 26.0,
            humidity_pct: 72.0,
            elevation_m: 100.0,
            rainfall: RainfallSignal::RainProbability(65.0),
            soil_ph: 6.0,
        }
    }
}

/// A complete input plus the names of the fields that were filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSite {
    pub input: SiteInput,
    pub substituted: Vec<&'static str>,
}

/// JSON keys of `SiteReadings`, in `SiteInput` field order
const READING_FIELDS: [&str; 6] = [
    "temperature_c",
    "humidity_pct",
    "elevation_m",
    "rainfall",
    "soil_ph",
    "latitude_deg",
];

impl SiteReadings {
    /// Parse readings from an untyped JSON value
    ///
    /// Failures become `InvalidInputError::Malformed` naming the first field
    /// with the wrong type, or `site` when the problem is an unknown key or a
    /// non-object body.
    pub fn from_json(value: serde_json::Value) -> Result<Self, InvalidInputError> {
        match serde_json::from_value::<SiteReadings>(value.clone()) {
            Ok(readings) => Ok(readings),
            Err(e) => Err(InvalidInputError::Malformed {
                field: malformed_field(&value),
                detail: e.to_string(),
            }),
        }
    }

    /// Fill missing fields from `fallbacks`, recording each substitution
    pub fn resolve(&self, fallbacks: &FallbackDefaults) -> Result<ResolvedSite, InvalidInputError> {
        let latitude_deg = self
            .latitude_deg
            .ok_or(InvalidInputError::Missing { field: "latitude_deg" })?;

        let mut substituted = Vec::new();
        let temperature_c = fill("temperature_c", self.temperature_c, fallbacks.temperature_c, &mut substituted);
        let humidity_pct = fill("humidity_pct", self.humidity_pct, fallbacks.humidity_pct, &mut substituted);
        let elevation_m = fill("elevation_m", self.elevation_m, fallbacks.elevation_m, &mut substituted);
        let rainfall = fill("rainfall", self.rainfall, fallbacks.rainfall, &mut substituted);
        let soil_ph = fill("soil_ph", self.soil_ph, fallbacks.soil_ph, &mut substituted);

        Ok(ResolvedSite {
            input: SiteInput::new(temperature_c, humidity_pct, elevation_m, rainfall, soil_ph, latitude_deg),
            substituted,
        })
    }
}

fn malformed_field(value: &serde_json::Value) -> &'static str {
    let Some(object) = value.as_object() else {
        return "site";
    };
    for field in READING_FIELDS {
        let well_typed = match object.get(field) {
            None | Some(serde_json::Value::Null) => true,
            Some(reading) if field == "rainfall" => {
                serde_json::from_value::<RainfallSignal>(reading.clone()).is_ok()
            }
            Some(reading) => reading.is_number(),
        };
        if !well_typed {
            return field;
        }
    }
    "site"
}

fn fill<T: Copy + std::fmt::Debug>(
    field: &'static str,
    reading: Option<T>,
    fallback: T,
    substituted: &mut Vec<&'static str>,
) -> T {
    match reading {
        Some(value) => value,
        None => {
            tracing::warn!(field, fallback = ?fallback, "reading unavailable, using fallback");
            substituted.push(field);
            fallback
        }
    }
}

impl TryFrom<SiteReadings> for SiteInput {
    type Error = InvalidInputError;

    /// Strict conversion: every reading must be present
    fn try_from(readings: SiteReadings) -> Result<Self, Self::Error> {
        let missing = |field| InvalidInputError::Missing { field };
        Ok(SiteInput::new(
            readings.temperature_c.ok_or_else(|| missing("temperature_c"))?,
            readings.humidity_pct.ok_or_else(|| missing("humidity_pct"))?,
            readings.elevation_m.ok_or_else(|| missing("elevation_m"))?,
            readings.rainfall.ok_or_else(|| missing("rainfall"))?,
            readings.soil_ph.ok_or_else(|| missing("soil_ph"))?,
            readings.latitude_deg.ok_or_else(|| missing("latitude_deg"))?,
        ))
    }
}
