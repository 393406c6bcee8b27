//! Parametric curves, splines and coordinate frames.
//!
//! The curves in this crate are the input side of rope and rail generation:
//!
//! - [`LineSegment`] - Straight segment between two points
//! - [`CubicBezier`] - Single cubic Bézier segment
//! - [`Spline`] - Piecewise cubic spline through oriented [`Knot`]s
//! - [`Polyline`] - Piecewise linear path, arc-length parameterized
//!
//! # Core Traits
//!
//! All curve types implement [`Curve`], which provides:
//!
//! - **Evaluation**: Position, derivative and unit tangent at `t ∈ [0, 1]`
//! - **Orientation**: Authored rotation applied to the world up vector
//! - **Arc length**: Total length and arc-length to parameter mapping
//! - **Validation**: Detection of zero-length segments
//!
//! # Frames
//!
//! [`frame_at`] samples a [`Frame`] (position, tangent, up, right) on any
//! curve. The up reference is the world up rotated by the curve's
//! orientation; a tangent parallel to it is recovered by substituting a
//! perpendicular reference.
//!
//! # Example
//!
//! ```
//! use curve_types::{Curve, LineSegment, frame_at};
//! use nalgebra::{Point3, Vector3};
//!
//! let rope = LineSegment::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0));
//! let frame = frame_at(&rope, 0.5, &Vector3::z()).unwrap();
//!
//! assert!((frame.position.y - 0.5).abs() < 1e-12);
//! assert!((frame.right - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
//! ```
//!
//! # Coordinate System
//!
//! Right-handed. The default world up used across the workspace is `+Z`.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

mod bezier;
mod error;
mod frame;
mod line;
mod polyline;
mod spline;
mod traits;

pub use bezier::CubicBezier;
pub use error::CurveError;
pub use frame::{Frame, frame_at, frame_at_distance, frames_at};
pub use line::LineSegment;
pub use polyline::Polyline;
pub use spline::{Knot, Spline};
pub use traits::{Curve, DEGENERATE_EPSILON};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use approx::assert_relative_eq;

    fn verify_curve_basics<C: Curve>(curve: &C) {
        assert!(curve.validate().is_ok());

        let tangent = curve.tangent_at(0.5);
        assert_relative_eq!(tangent.norm(), 1.0, epsilon = 1e-10);

        assert!(curve.arc_length() > 0.0);
        assert_eq!(curve.sample_uniform(10).len(), 10);
        assert_relative_eq!(curve.start(), curve.point_at(0.0));
        assert_relative_eq!(curve.end(), curve.point_at(1.0));
    }

    /// All curve types implement the Curve trait consistently.
    #[test]
    fn test_curve_trait_consistency() {
        verify_curve_basics(&LineSegment::new(
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        ));

        verify_curve_basics(&CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ));

        verify_curve_basics(
            &Polyline::new(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ])
            .unwrap(),
        );

        verify_curve_basics(
            &Spline::catmull_rom(
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.5),
                    Point3::new(2.0, 1.0, 0.0),
                ],
                false,
            )
            .unwrap(),
        );
    }

    #[test]
    fn test_frames_along_spline_are_orthonormal() {
        let spline = Spline::catmull_rom(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 1.0),
                Point3::new(0.0, 2.0, 1.0),
            ],
            true,
        )
        .unwrap();

        let params: Vec<f64> = (0..=16).map(|i| f64::from(i) / 16.0).collect();
        let frames = frames_at(&spline, &params, &Vector3::z()).unwrap();
        assert_eq!(frames.len(), 17);
        for frame in &frames {
            assert!(frame.is_orthonormal(1e-9));
        }
    }
}
