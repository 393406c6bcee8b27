//! Change-driven regeneration.
//!
//! A rope is rebuilt only when its authored input changes. Instead of dirty
//! flags the caller hands over the current [`RopeSnapshot`];
//! [`regeneration_decision`] diffs it against the last one and
//! [`RopeInstance::update`] acts on the result.

use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CurveSpec, Result, RopeAsset, RopeConfig, generate};

/// Authored input of one rope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeSnapshot {
    /// Control data of the curve.
    pub curve: CurveSpec,
    /// Generation settings.
    pub config: RopeConfig,
}

impl RopeSnapshot {
    /// Bundle a curve and its settings.
    #[must_use]
    pub fn new(curve: CurveSpec, config: RopeConfig) -> Self {
        Self { curve, config }
    }
}

/// What to do with a rope after its input was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegenerationDecision {
    /// Discard the old asset and generate a new one.
    Replace,
    /// Input is unchanged; keep the current asset.
    Skip,
}

/// Compare the previous snapshot with the current one.
///
/// Any difference in curve control data or settings means
/// [`Replace`](RegenerationDecision::Replace); so does having no previous
/// snapshot.
#[must_use]
pub fn regeneration_decision(
    previous: Option<&RopeSnapshot>,
    current: &RopeSnapshot,
) -> RegenerationDecision {
    match previous {
        Some(previous) if previous == current => RegenerationDecision::Skip,
        _ => RegenerationDecision::Replace,
    }
}

/// A rope that regenerates itself when its input changes.
///
/// [`update`](Self::update) takes `&mut self`, so one instance never runs two
/// regenerations at once. A failed regeneration leaves the last good asset
/// in place.
///
/// # Example
///
/// ```
/// use rope_rig::{CurveSpec, RegenerationDecision, RopeConfig, RopeInstance, RopeSnapshot};
/// use nalgebra::Point3;
///
/// let mut rope = RopeInstance::new();
/// let snapshot = RopeSnapshot::new(
///     CurveSpec::segment(Point3::origin(), Point3::new(0.0, 1.0, 0.0)),
///     RopeConfig::default(),
/// );
///
/// assert_eq!(rope.update(snapshot.clone()).unwrap(), RegenerationDecision::Replace);
/// assert_eq!(rope.update(snapshot).unwrap(), RegenerationDecision::Skip);
/// assert_eq!(rope.generation(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RopeInstance {
    snapshot: Option<RopeSnapshot>,
    asset: Option<RopeAsset>,
    generation: u64,
}

impl RopeInstance {
    /// Create an instance with nothing generated yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `snapshot` and regenerate if it differs from the last one.
    ///
    /// The snapshot is remembered even when generation fails, so unchanged
    /// broken input is not retried on every call.
    ///
    /// # Errors
    ///
    /// Returns the generation error. The previous asset, if any, is kept.
    pub fn update(&mut self, snapshot: RopeSnapshot) -> Result<RegenerationDecision> {
        let decision = regeneration_decision(self.snapshot.as_ref(), &snapshot);
        if decision == RegenerationDecision::Skip {
            debug!(generation = self.generation, "Rope input unchanged");
            return Ok(decision);
        }

        let result = generate(&snapshot.curve, &snapshot.config);
        self.snapshot = Some(snapshot);
        let asset = result?;

        self.asset = Some(asset);
        self.generation += 1;
        info!(generation = self.generation, "Rope regenerated");
        Ok(decision)
    }

    /// The last successfully generated asset.
    #[must_use]
    pub fn asset(&self) -> Option<&RopeAsset> {
        self.asset.as_ref()
    }

    /// The last observed input.
    #[must_use]
    pub fn snapshot(&self) -> Option<&RopeSnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of successful regenerations.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the asset and snapshot so the next update regenerates.
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.asset = None;
    }
}
