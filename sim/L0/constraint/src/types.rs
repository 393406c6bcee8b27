//! Angular limit presets.

use std::f64::consts::{FRAC_PI_2, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConstraintError, JointLimits, Result};

/// Angular limits of a ragdoll joint pair.
///
/// The primary joint bounds the swing of the twist axis inside a cone of
/// half-angle `max_cone` and the rotation about it by `twist`. The
/// perpendicular joint bounds swing of the perpendicular axis by
/// `perpendicular`, which resists twisting while still letting the rope bend
/// in two directions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RagdollLimits {
    /// Half-angle of the primary swing cone (radians).
    pub max_cone: f64,
    /// Rotation about the twist axis (radians).
    pub twist: JointLimits,
    /// Swing range of the perpendicular axis (radians).
    pub perpendicular: JointLimits,
}

impl Default for RagdollLimits {
    fn default() -> Self {
        Self {
            max_cone: FRAC_PI_2,
            twist: JointLimits::symmetric(FRAC_PI_2),
            perpendicular: JointLimits::symmetric(PI / 16.0),
        }
    }
}

impl RagdollLimits {
    /// Set the primary cone half-angle.
    #[must_use]
    pub fn with_max_cone(mut self, max_cone: f64) -> Self {
        self.max_cone = max_cone;
        self
    }

    /// Set the twist range.
    #[must_use]
    pub fn with_twist(mut self, twist: JointLimits) -> Self {
        self.twist = twist;
        self
    }

    /// Set the perpendicular swing range.
    #[must_use]
    pub fn with_perpendicular(mut self, perpendicular: JointLimits) -> Self {
        self.perpendicular = perpendicular;
        self
    }

    /// Check that all angles lie within `[-π, π]` and the cone is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::InvalidLimits`] naming the offending range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=PI).contains(&self.max_cone) {
            return Err(ConstraintError::InvalidLimits {
                lower: 0.0,
                upper: self.max_cone,
            });
        }
        for limits in [self.twist, self.perpendicular] {
            limits.validate()?;
            if limits.lower() < -PI || limits.upper() > PI {
                return Err(ConstraintError::InvalidLimits {
                    lower: limits.lower(),
                    upper: limits.upper(),
                });
            }
        }
        Ok(())
    }
}
