//! Error types for mesh generation.

use curve_types::CurveError;
use mesh_types::MeshError;
use thiserror::Error;

/// Result type for mesh generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur while generating a mesh from a curve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    /// Segment or vertex counts below the minimum the topology needs.
    #[error("invalid topology: {parameter} must be at least {min}, got {actual}")]
    InvalidTopology {
        /// Name of the offending count.
        parameter: &'static str,
        /// Minimum allowed value.
        min: usize,
        /// Value supplied.
        actual: usize,
    },

    /// A size parameter is negative, zero where it must not be, or not finite.
    #[error("invalid {parameter}: {value}")]
    InvalidDimension {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied.
        value: f64,
    },

    /// Curve evaluation failed (zero-length segment or too few points).
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// The produced buffers failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl GenerateError {
    /// Check for a topology precondition failure.
    #[must_use]
    pub fn is_invalid_topology(&self) -> bool {
        matches!(self, Self::InvalidTopology { .. })
    }

    /// Check for a zero-length curve or segment.
    #[must_use]
    pub fn is_degenerate_curve(&self) -> bool {
        matches!(self, Self::Curve(e) if e.is_degenerate_curve())
    }
}

pub(crate) fn require_count(parameter: &'static str, actual: usize, min: usize) -> GenerateResult<()> {
    if actual < min {
        return Err(GenerateError::InvalidTopology {
            parameter,
            min,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> GenerateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GenerateError::InvalidDimension { parameter, value });
    }
    Ok(())
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> GenerateResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GenerateError::InvalidDimension { parameter, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_message() {
        let err = require_count("segment_count", 1, 2).unwrap_err();
        assert!(err.is_invalid_topology());
        assert_eq!(
            err.to_string(),
            "invalid topology: segment_count must be at least 2, got 1"
        );
    }

    #[test]
    fn test_dimension_checks() {
        assert!(require_non_negative("delta_out", 0.0).is_ok());
        assert!(require_non_negative("delta_out", -0.1).is_err());
        assert!(require_positive("width", 0.0).is_err());
        assert!(require_positive("width", f64::NAN).is_err());
    }

    #[test]
    fn test_curve_error_classification() {
        let err = GenerateError::from(CurveError::degenerate(0, "start and end coincide"));
        assert!(err.is_degenerate_curve());
        assert!(!err.is_invalid_topology());
    }
}
