//! Stepping a body along a polyline path with prismatic joints.

use curve_types::Polyline;
use sim_types::BodyId;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConstraintError, JointSpec, Result, prismatic_between};

/// Which path segment a constrained body is currently riding.
///
/// The cursor is explicit state owned by the caller: each [`step`](Self::step)
/// returns the joint for the current segment together with the advanced
/// cursor, wrapping after the last segment.
///
/// # Example
///
/// ```
/// use curve_types::Polyline;
/// use sim_constraint::PathCursor;
/// use sim_types::BodyId;
/// use nalgebra::Point3;
///
/// let path = Polyline::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
/// ])
/// .unwrap();
///
/// let cursor = PathCursor::default();
/// let first = cursor.step(BodyId::new(0), &path).unwrap();
/// let second = first.next.step(BodyId::new(0), &path).unwrap();
///
/// assert_eq!(second.next.segment(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathCursor {
    segment: usize,
}

/// Result of advancing a [`PathCursor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Prismatic joint along the segment the cursor pointed at.
    pub joint: JointSpec,
    /// Cursor for the following step.
    pub next: PathCursor,
}

impl PathCursor {
    /// Cursor positioned at `segment`.
    #[must_use]
    pub const fn at(segment: usize) -> Self {
        Self { segment }
    }

    /// Current segment index.
    #[must_use]
    pub const fn segment(&self) -> usize {
        self.segment
    }

    /// Build the joint for the current segment and advance.
    ///
    /// The index wraps modulo the path's segment count, so a cursor built for
    /// a longer path stays usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::DegenerateAxis`](crate::ConstraintError::DegenerateAxis)
    /// if the segment has zero length.
    pub fn step(self, body: BodyId, path: &Polyline) -> Result<PathStep> {
        let count = path.num_segments().max(1);
        let segment = self.segment % count;
        let (a, b) = path
            .segment(segment)
            .ok_or_else(|| ConstraintError::degenerate_axis("path has no segments"))?;

        let joint = prismatic_between(body, a, b)?;
        let next = Self::at((segment + 1) % count);

        debug!(body = %body, segment, next = next.segment, "Advanced path cursor");

        Ok(PathStep { joint, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JointKind;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn path() -> Polyline {
        Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn steps_through_segments_and_wraps() {
        let body = BodyId::new(1);
        let path = path();

        let first = PathCursor::default().step(body, &path).unwrap();
        assert_relative_eq!(first.joint.frame_a.axis, Vector3::x());
        assert_relative_eq!(first.joint.frame_b.position, Point3::origin());
        assert_eq!(first.next.segment(), 1);

        let second = first.next.step(body, &path).unwrap();
        assert_relative_eq!(second.joint.frame_a.axis, Vector3::z());
        assert_relative_eq!(second.joint.frame_b.position, Point3::new(2.0, 0.0, 0.0));
        let JointKind::Prismatic { limits } = second.joint.kind else {
            panic!("expected prismatic");
        };
        assert_relative_eq!(limits.upper(), 3.0);

        assert_eq!(second.next, PathCursor::at(0));
    }

    #[test]
    fn stale_cursor_wraps_into_range() {
        let step = PathCursor::at(5).step(BodyId::new(0), &path()).unwrap();
        assert_relative_eq!(step.joint.frame_a.axis, Vector3::z());
        assert_eq!(step.next.segment(), 0);
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        let path = Polyline::new(vec![Point3::origin(), Point3::origin()]).unwrap();
        assert!(PathCursor::default().step(BodyId::new(0), &path).is_err());
    }
}
