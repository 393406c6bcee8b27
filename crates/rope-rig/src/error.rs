//! Error types for rope rig generation.

use curve_types::CurveError;
use mesh_from_curves::GenerateError;
use sim_deformable::DeformableError;
use thiserror::Error;

/// Result type for rope rig operations.
pub type Result<T> = std::result::Result<T, RigError>;

/// Errors that abort rope rig generation.
///
/// Nothing is produced when generation fails; a [`RopeInstance`](crate::RopeInstance)
/// keeps showing its previous asset.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    /// The curve itself is unusable.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Mesh generation failed.
    #[error(transparent)]
    Mesh(#[from] GenerateError),

    /// Skin binding or chain construction failed.
    #[error(transparent)]
    Rig(#[from] DeformableError),

    /// The sub-configurations disagree with each other.
    #[error("inconsistent configuration: {0}")]
    InconsistentConfig(String),
}

impl RigError {
    /// Create an inconsistent configuration error.
    pub fn inconsistent_config(msg: impl Into<String>) -> Self {
        Self::InconsistentConfig(msg.into())
    }

    /// Check if the error comes from authored settings rather than geometry.
    ///
    /// These need the author to change the configuration; a degenerate curve
    /// instead needs different control points.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Curve(e) => e.is_insufficient_points(),
            Self::Mesh(e) => matches!(
                e,
                GenerateError::InvalidTopology { .. } | GenerateError::InvalidDimension { .. }
            ),
            Self::Rig(e) => matches!(
                e,
                DeformableError::InvalidTopology { .. }
                    | DeformableError::InvalidConfig(_)
                    | DeformableError::Constraint(_)
            ),
            Self::InconsistentConfig(_) => true,
        }
    }

    /// Check if the error is an invalid segment or vertex count.
    #[must_use]
    pub fn is_invalid_topology(&self) -> bool {
        match self {
            Self::Mesh(e) => e.is_invalid_topology(),
            Self::Rig(e) => e.is_invalid_topology(),
            _ => false,
        }
    }

    /// Check for a zero-length curve or segment.
    #[must_use]
    pub fn is_degenerate_curve(&self) -> bool {
        match self {
            Self::Curve(e) => e.is_degenerate_curve(),
            Self::Mesh(e) => e.is_degenerate_curve(),
            Self::Rig(e) => e.is_degenerate_curve(),
            Self::InconsistentConfig(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_topology_errors() {
        let err = RigError::from(GenerateError::InvalidTopology {
            parameter: "segment_count",
            min: 2,
            actual: 1,
        });
        assert!(err.is_configuration_error());
        assert!(err.is_invalid_topology());
        assert!(!err.is_degenerate_curve());
    }

    #[test]
    fn classifies_degenerate_curves() {
        let err = RigError::from(DeformableError::from(CurveError::degenerate(0, "zero length")));
        assert!(err.is_degenerate_curve());
        assert!(!err.is_configuration_error());

        let err = RigError::from(CurveError::degenerate(2, "knots coincide"));
        assert!(err.is_degenerate_curve());
    }

    #[test]
    fn too_few_points_is_a_configuration_error() {
        let err = RigError::from(CurveError::insufficient_points(2, 1));
        assert!(err.is_configuration_error());
        assert!(!err.is_degenerate_curve());
    }

    #[test]
    fn display_passes_through() {
        let err = RigError::from(CurveError::degenerate(0, "start and end coincide"));
        assert!(err.to_string().contains("start and end coincide"));

        let err = RigError::inconsistent_config("world up differs");
        assert_eq!(err.to_string(), "inconsistent configuration: world up differs");
    }
}
