//! Error types for curve operations.

use thiserror::Error;

/// Errors that can occur during curve operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Insufficient points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Zero-length curve or curve segment.
    ///
    /// Generation for the owning curve must abort; there is no meaningful
    /// tangent to build geometry around.
    #[error("degenerate curve at segment {segment}: {reason}")]
    DegenerateCurve {
        /// Index of the offending segment (0 for single-segment curves).
        segment: usize,
        /// Description of the degeneracy.
        reason: String,
    },

    /// Tangent is (nearly) parallel to the reference up vector.
    ///
    /// Non-fatal: [`Frame::look_along`](crate::Frame::look_along) recovers by
    /// substituting an arbitrary perpendicular reference.
    #[error("degenerate frame: tangent {tangent:?} is parallel to reference up {up:?}")]
    DegenerateFrame {
        /// The (normalized) tangent.
        tangent: [f64; 3],
        /// The reference up that could not be used.
        up: [f64; 3],
    },

    /// Segment index does not exist on this curve.
    #[error("segment index {index} out of range for curve with {count} segments")]
    SegmentOutOfRange {
        /// Requested segment.
        index: usize,
        /// Number of segments on the curve.
        count: usize,
    },
}

impl CurveError {
    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create a degenerate curve error.
    #[must_use]
    pub fn degenerate(segment: usize, reason: impl Into<String>) -> Self {
        Self::DegenerateCurve {
            segment,
            reason: reason.into(),
        }
    }

    /// Check if this is a degenerate curve error.
    #[must_use]
    pub fn is_degenerate_curve(&self) -> bool {
        matches!(self, Self::DegenerateCurve { .. })
    }

    /// Check if this is a degenerate frame error.
    #[must_use]
    pub fn is_degenerate_frame(&self) -> bool {
        matches!(self, Self::DegenerateFrame { .. })
    }

    /// Check if this is an insufficient points error.
    #[must_use]
    pub fn is_insufficient_points(&self) -> bool {
        matches!(self, Self::InsufficientPoints { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::insufficient_points(2, 1);
        assert!(err.to_string().contains("need at least 2"));
        assert!(err.to_string().contains("got 1"));

        let err = CurveError::degenerate(3, "zero length");
        assert!(err.to_string().contains("segment 3"));
        assert!(err.to_string().contains("zero length"));

        let err = CurveError::SegmentOutOfRange { index: 4, count: 2 };
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn test_error_predicates() {
        let err = CurveError::degenerate(0, "start == end");
        assert!(err.is_degenerate_curve());
        assert!(!err.is_degenerate_frame());

        let err = CurveError::DegenerateFrame {
            tangent: [0.0, 0.0, 1.0],
            up: [0.0, 0.0, 1.0],
        };
        assert!(err.is_degenerate_frame());
        assert!(!err.is_insufficient_points());
    }
}
