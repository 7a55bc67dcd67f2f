//! Errors raised when validating values at the library boundary.
//!
//! The inference pipeline itself cannot fail on finite inputs; these only come from the
//! checked entry points such as `try_evaluate` and the surface axis constructors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FanControlError {
    /// A crisp input was NaN or infinite.
    #[error("{input} must be a finite number, got {value}")]
    NonFiniteInput { input: &'static str, value: f64 },

    /// A surface axis cannot be sampled.
    #[error("Invalid {axis} axis: {reason}")]
    InvalidAxis { axis: &'static str, reason: String },
}

/// Result type alias for checked fan control operations.
pub type Result<T> = std::result::Result<T, FanControlError>;

pub(crate) fn ensure_finite(input: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FanControlError::NonFiniteInput { input, value })
    }
}

#[test]
fn test_ensure_finite() {
    assert_eq!(ensure_finite("temperature", 21.5), Ok(21.5));
    assert_eq!(
        ensure_finite("occupancy", f64::INFINITY),
        Err(FanControlError::NonFiniteInput { input: "occupancy", value: f64::INFINITY })
    );
    assert!(ensure_finite("temperature", f64::NAN).is_err());
}

#[test]
fn test_error_messages() {
    let err = FanControlError::NonFiniteInput { input: "temperature", value: f64::NAN };

    assert_eq!(err.to_string(), "temperature must be a finite number, got NaN");

    let err = FanControlError::InvalidAxis { axis: "occupancy", reason: "step must be positive".into() };

    assert_eq!(err.to_string(), "Invalid occupancy axis: step must be positive");
}
