//! Error types for joint and path descriptors.

use curve_types::CurveError;
use thiserror::Error;

/// Errors raised while building joint specifications.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    /// A joint axis or path step has zero length.
    #[error("degenerate axis: {reason}")]
    DegenerateAxis {
        /// What collapsed.
        reason: String,
    },

    /// Limit bounds are `NaN` or cone angles are outside `[0, π]`.
    #[error("invalid limits: [{lower}, {upper}]")]
    InvalidLimits {
        /// Lower bound supplied.
        lower: f64,
        /// Upper bound supplied.
        upper: f64,
    },

    /// A timestep is zero, negative or not finite.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// Path construction failed.
    #[error(transparent)]
    Path(#[from] CurveError),
}

impl ConstraintError {
    /// Create a degenerate axis error.
    #[must_use]
    pub fn degenerate_axis(reason: impl Into<String>) -> Self {
        Self::DegenerateAxis {
            reason: reason.into(),
        }
    }

    /// Check for a zero-length axis.
    #[must_use]
    pub fn is_degenerate_axis(&self) -> bool {
        matches!(self, Self::DegenerateAxis { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = ConstraintError::degenerate_axis("path points 0 and 1 coincide");
        assert!(err.is_degenerate_axis());
        assert!(err.to_string().contains("coincide"));

        let err = ConstraintError::InvalidTimestep(-0.01);
        assert!(err.to_string().contains("-0.01"));
        assert!(!err.is_degenerate_axis());
    }
}
