//! Error types for skin binding and chain construction.

use curve_types::CurveError;
use sim_constraint::ConstraintError;
use sim_types::SimError;
use thiserror::Error;

/// Errors that can occur while binding a skin or building a chain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeformableError {
    /// Segment or vertex counts below the minimum the topology needs.
    #[error("Invalid topology: {parameter} must be at least {min}, got {actual}")]
    InvalidTopology {
        /// Name of the offending count.
        parameter: &'static str,
        /// Minimum allowed value.
        min: usize,
        /// Value supplied.
        actual: usize,
    },

    /// Index out of bounds.
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    /// Configuration error.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Curve sampling failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Joint construction failed.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// A generated body is unusable.
    #[error(transparent)]
    Body(#[from] SimError),
}

impl DeformableError {
    /// Create an index out of bounds error.
    pub fn index_out_of_bounds(msg: impl Into<String>) -> Self {
        Self::IndexOutOfBounds(msg.into())
    }

    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

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

/// Result type for deformable body operations.
pub type Result<T> = std::result::Result<T, DeformableError>;

pub(crate) fn require_count(parameter: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(DeformableError::InvalidTopology {
            parameter,
            min,
            actual,
        });
    }
    Ok(())
}
