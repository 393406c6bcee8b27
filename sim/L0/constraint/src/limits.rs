//! Limit ranges for a single joint coordinate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConstraintError, Result};

/// Inclusive `[lower, upper]` bound on one joint coordinate.
///
/// Cone and twist coordinates are angles in radians. A prismatic slide
/// measures travel in meters from its first anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointLimits {
    lower: f64,
    upper: f64,
}

impl JointLimits {
    /// Limits from two bounds in either order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// `[-bound, bound]`. The sign of `bound` is ignored.
    #[must_use]
    pub fn symmetric(bound: f64) -> Self {
        let bound = bound.abs();
        Self {
            lower: -bound,
            upper: bound,
        }
    }

    /// Slide from the first anchor (`0`) to a point `distance` along the axis.
    #[must_use]
    pub fn travel(distance: f64) -> Self {
        Self::new(0.0, distance)
    }

    /// No bound on either side.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// Smallest allowed value.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Largest allowed value.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Check both bounds are numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::InvalidLimits`] if either bound is `NaN`.
    pub fn validate(&self) -> Result<()> {
        if self.lower.is_nan() || self.upper.is_nan() {
            return Err(ConstraintError::InvalidLimits {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}
