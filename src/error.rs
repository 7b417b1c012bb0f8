//! Input validation errors
//!
//! `InvalidInputError` is the only failure the engine can produce. It is raised
//! before any scoring happens, so a failed evaluation never yields a partial
//! result.

use thiserror::Error;

/// A site measurement that cannot be scored
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// NaN or infinite measurement
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    /// Finite, but physically impossible (e.g. humidity above 100%)
    #[error("{field} = {value} is outside its physical domain [{min}, {max}]")]
    OutOfDomain {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Required measurement was never supplied
    #[error("{field} is missing")]
    Missing { field: &'static str },

    /// Reading JSON with a non-numeric value or an unknown key
    #[error("{field} is malformed: {detail}")]
    Malformed { field: &'static str, detail: String },
}

impl InvalidInputError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            InvalidInputError::NonFinite { field, .. }
            | InvalidInputError::OutOfDomain { field, .. }
            | InvalidInputError::Missing { field }
            | InvalidInputError::Malformed { field, .. } => field,
        }
    }
}

/// Check that `value` is finite and inside `[min, max]`
pub(crate) fn check_domain(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::NonFinite { field, value });
    }
    if value < min || value > max {
        return Err(InvalidInputError::OutOfDomain { field, value, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_domain_accepts_bounds() {
        assert_eq!(check_domain("humidity_pct", 0.0, 0.0, 100.0), Ok(0.0));
        assert_eq!(check_domain("humidity_pct", 100.0, 0.0, 100.0), Ok(100.0));
    }

    #[test]
    fn test_check_domain_rejects_nan_and_infinity() {
        let err = check_domain("temperature_c", f64::NAN, -90.0, 60.0).unwrap_err();
        assert!(matches!(err, InvalidInputError::NonFinite { field: "temperature_c", .. }));

        let err = check_domain("temperature_c", f64::INFINITY, -90.0, 60.0).unwrap_err();
        assert_eq!(err.field(), "temperature_c");
    }

    #[test]
    fn test_check_domain_rejects_out_of_range() {
        let err = check_domain("humidity_pct", -5.0, 0.0, 100.0).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::OutOfDomain { field: "humidity_pct", value: -5.0, min: 0.0, max: 100.0 }
        );
        assert_eq!(
            err.to_string(),
            "humidity_pct = -5 is outside its physical domain [0, 100]"
        );
    }
}
