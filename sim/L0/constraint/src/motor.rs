//! Kinematic motor driving a body back and forth along a path.

use std::f64::consts::PI;

use curve_types::Polyline;
use nalgebra::Point3;
use sim_types::Twist;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConstraintError, Result};

/// A motor that ping-pongs a body along a polyline.
///
/// At elapsed time `t` the motor targets the point at fraction
/// `sin(t·π·speed)·0.5 + 0.5` of the path length, so one full round trip
/// takes `2 / speed` seconds. The commanded velocity reaches that target in
/// one step and is clamped to `max_speed`.
///
/// # Example
///
/// ```
/// use curve_types::Polyline;
/// use sim_constraint::PathMotor;
/// use nalgebra::Point3;
///
/// let path = Polyline::new(vec![Point3::origin(), Point3::new(4.0, 0.0, 0.0)]).unwrap();
/// let motor = PathMotor::new(0.5);
///
/// // Halfway at t = 0, at the far end a quarter cycle later.
/// assert!((motor.target(&path, 0.0).x - 2.0).abs() < 1e-12);
/// assert!((motor.target(&path, 1.0).x - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathMotor {
    /// Oscillation rate (half cycles per second).
    speed: f64,

    /// Maximum commanded speed (m/s).
    max_speed: f64,

    /// Whether the motor is currently enabled.
    enabled: bool,
}

/// Velocity command produced by [`PathMotor::drive`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorCommand {
    /// Point the body should reach this step.
    pub target: Point3<f64>,
    /// Velocity to apply.
    pub twist: Twist,
}

impl PathMotor {
    /// Create an enabled motor with unbounded speed.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            max_speed: f64::INFINITY,
            enabled: true,
        }
    }

    /// Create a disabled motor.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0.0).with_enabled(false)
    }

    /// Set the maximum commanded speed.
    #[must_use]
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed.abs();
        self
    }

    /// Enable or disable the motor.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Oscillation rate.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Maximum commanded speed.
    #[must_use]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Check if the motor is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fraction of the path targeted at `elapsed` seconds, in `[0, 1]`.
    #[must_use]
    pub fn interpolation(&self, elapsed: f64) -> f64 {
        (elapsed * PI * self.speed).sin() * 0.5 + 0.5
    }

    /// Point on `path` targeted at `elapsed` seconds.
    #[must_use]
    pub fn target(&self, path: &Polyline, elapsed: f64) -> Point3<f64> {
        path.point_at_distance(path.length() * self.interpolation(elapsed))
    }

    /// Velocity that moves `current` onto `target` in `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::InvalidTimestep`] if `dt` is not positive
    /// and finite.
    pub fn velocity_to_target(
        &self,
        current: &Point3<f64>,
        target: &Point3<f64>,
        dt: f64,
    ) -> Result<Twist> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ConstraintError::InvalidTimestep(dt));
        }
        if !self.enabled {
            return Ok(Twist::zero());
        }

        let velocity = (target - current) / dt;
        let speed = velocity.norm();
        let velocity = if speed > self.max_speed {
            velocity * (self.max_speed / speed)
        } else {
            velocity
        };
        Ok(Twist::linear(velocity))
    }

    /// Target and velocity for a body at `current` after `elapsed` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::InvalidTimestep`] if `dt` is not positive
    /// and finite.
    pub fn drive(
        &self,
        path: &Polyline,
        current: &Point3<f64>,
        elapsed: f64,
        dt: f64,
    ) -> Result<MotorCommand> {
        let target = self.target(path, elapsed);
        let twist = self.velocity_to_target(current, &target, dt)?;
        Ok(MotorCommand { target, twist })
    }
}

impl Default for PathMotor {
    fn default() -> Self {
        Self::new(1.0)
    }
}
