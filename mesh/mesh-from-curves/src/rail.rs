//! Rectangular rails extruded along a spline with rounded corners.
//!
//! Runs between knots are straight. At each interior knot the cross-section
//! stops `corner_radius` short of the knot, sweeps around a pivot on the
//! inside of the bend and resumes `corner_radius` past it. Open splines start
//! and end in a flat stub section and are closed by two caps.
//!
//! A cross-section's `right` is `backward × up`, where `backward` points
//! against the direction of travel. Seen from behind, its corners are
//!
//! ```text
//!   c3 ------ c0        c0 = origin + right*w + up*h
//!    |   up    |        c1 = origin + right*w - up*h
//!    |   ^     |        c2 = origin - right*w - up*h
//!    |   o-> right      c3 = origin - right*w + up*h
//!   c2 ------ c1
//! ```
//!
//! Each corner is emitted twice so the four side faces are flat shaded.

use curve_types::{Curve, CurveError, DEGENERATE_EPSILON, Frame, Spline};
use mesh_types::MeshBuffers;
use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RailConfig;
use crate::error::GenerateResult;

/// Below this `|d_end · right_start|` a corner is treated as straight.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Vertices per cross-section (four corners, each duplicated).
pub const SECTION_VERTICES: usize = 8;

/// A rail cross-section placement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RailSection {
    /// Center of the cross-section.
    pub origin: Point3<f64>,
    /// Unit vector to the right-hand side.
    pub right: Vector3<f64>,
    /// Unit up vector.
    pub up: Vector3<f64>,
}

impl RailSection {
    /// Build a section facing `backward` (against the direction of travel).
    ///
    /// `up` is re-orthogonalized against `backward`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Curve`](crate::GenerateError::Curve) if
    /// `backward` has zero length.
    pub fn facing(origin: Point3<f64>, backward: Vector3<f64>, up: Vector3<f64>) -> GenerateResult<Self> {
        let frame = Frame::look_along(origin, backward, up, 0.0)?;
        Ok(Self {
            origin,
            right: frame.right,
            up: frame.up,
        })
    }

    /// Unit vector against the direction of travel.
    #[must_use]
    pub fn backward(&self) -> Vector3<f64> {
        self.up.cross(&self.right)
    }

    /// The four corners `[c0, c1, c2, c3]` for half-extents `width`, `height`.
    #[must_use]
    pub fn corners(&self, width: f64, height: f64) -> [Point3<f64>; 4] {
        let r = self.right * width;
        let u = self.up * height;
        [
            self.origin + r + u,
            self.origin + r - u,
            self.origin - r - u,
            self.origin - r + u,
        ]
    }

    /// Rotate about `self.up` through `pivot`.
    #[must_use]
    fn rotated_about(&self, pivot: &Point3<f64>, angle: f64) -> Self {
        let rotation = UnitQuaternion::from_scaled_axis(self.up * angle);
        Self {
            origin: pivot + rotation * (self.origin - pivot),
            right: rotation * self.right,
            up: self.up,
        }
    }
}

/// Flat stub section at an open end of the rail.
///
/// Both stubs of a rail face against the direction of travel, so `backward`
/// is the end curve's `p0 - p3` at either end.
///
/// # Errors
///
/// Returns [`GenerateError::Curve`](crate::GenerateError::Curve) if
/// `backward` has zero length.
pub fn stub_section(
    point: Point3<f64>,
    backward: Vector3<f64>,
    up: Vector3<f64>,
) -> GenerateResult<RailSection> {
    RailSection::facing(point, backward, up)
}

/// Sections sweeping around the corner at `knot`.
///
/// Produces `corner_segments + 1` sections, from `corner_radius` before the
/// knot (toward `prev`) to `corner_radius` after it (toward `next`). The pivot
/// is where the ray along the first section's right axis meets the plane of
/// the last section. The sweep angle is the signed angle about up between the
/// pivot-relative start and end points. With a zero `corner_radius` the
/// pivot is the knot itself and the sections turn in place through the bend
/// angle. Collinear knots have no pivot; their sections are spaced evenly
/// along the straight line instead.
///
/// # Errors
///
/// Returns [`GenerateError::Curve`](crate::GenerateError::Curve) if `knot`
/// coincides with `prev` or `next`.
pub fn corner_sweep(
    prev: Point3<f64>,
    knot: Point3<f64>,
    next: Point3<f64>,
    up: Vector3<f64>,
    corner_radius: f64,
    corner_segments: usize,
) -> GenerateResult<Vec<RailSection>> {
    let to_start_dir = prev - knot;
    let to_end_dir = next - knot;

    let start = RailSection::facing(knot, to_start_dir, up)?;
    let to_start_dir = start.backward();
    let to_end_dir = to_end_dir
        .try_normalize(DEGENERATE_EPSILON)
        .ok_or_else(|| CurveError::degenerate(0, "corner knot coincides with next knot"))?;

    let start = RailSection {
        origin: knot + to_start_dir * corner_radius,
        ..start
    };
    let to_end = knot + to_end_dir * corner_radius;

    let steps = corner_segments.max(1);
    let denom = to_end_dir.dot(&start.right);

    if denom.abs() < PARALLEL_EPSILON {
        debug!(knot = ?knot, "Straight-through rail knot, no corner pivot");
        return Ok((0..=steps)
            .map(|i| {
                let f = i as f64 / steps as f64;
                RailSection {
                    origin: start.origin + (to_end - start.origin) * f,
                    ..start
                }
            })
            .collect());
    }

    let along = to_end_dir.dot(&(to_end - start.origin)) / denom;
    let pivot = start.origin + start.right * along;

    let a = start.origin - pivot;
    let b = to_end - pivot;
    let angle = if a.norm() > DEGENERATE_EPSILON && b.norm() > DEGENERATE_EPSILON {
        start.up.dot(&a.cross(&b)).atan2(a.dot(&b))
    } else {
        // Zero radius collapses the pivot onto the knot; turn by the bend itself.
        let incoming = -to_start_dir;
        start.up.dot(&incoming.cross(&to_end_dir)).atan2(incoming.dot(&to_end_dir))
    };
    let step = angle / steps as f64;

    Ok((0..=steps)
        .map(|i| start.rotated_about(&pivot, step * i as f64))
        .collect())
}

/// Extrude `sections` into a flat-shaded solid.
///
/// Consecutive sections are joined by four quads. A closed rail also joins
/// the last section back to the first; an open one gets a cap at each end.
#[must_use]
pub fn extrude_sections(sections: &[RailSection], width: f64, height: f64, closed: bool) -> MeshBuffers {
    let quad_count = if closed {
        sections.len()
    } else {
        sections.len().saturating_sub(1)
    };
    let mut mesh = MeshBuffers::with_capacity(
        sections.len() * SECTION_VERTICES + 8,
        quad_count * 8 + 4,
    );
    if sections.is_empty() {
        return mesh;
    }

    let uv_corners = [
        Vector2::new(0.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(1.0, 0.0),
    ];

    for section in sections {
        let corners = section.corners(width, height);
        let (r, u) = (section.right, section.up);
        let normals = [[u, r], [r, -u], [-u, -r], [-r, u]];
        for ((corner, pair), uv) in corners.iter().zip(normals).zip(uv_corners) {
            for normal in pair {
                mesh.push_vertex(*corner, normal, uv);
            }
        }
    }

    let section_count = sections.len() as u32;
    for s in 0..quad_count as u32 {
        let o = s * SECTION_VERTICES as u32;
        let n = ((s + 1) % section_count) * SECTION_VERTICES as u32;
        mesh.indices.extend_from_slice(&[
            [o + 2, o + 1, n + 1],
            [o + 2, n + 1, n + 2],
            [o + 4, o + 3, n + 3],
            [o + 4, n + 3, n + 4],
            [o + 6, o + 5, n + 5],
            [o + 6, n + 5, n + 6],
            [n, o + 7, n + 7],
            [o, o + 7, n],
        ]);
    }

    if !closed {
        add_cap(&mut mesh, sections[0], 0, false);
        let last_offset = (sections.len() - 1) * SECTION_VERTICES;
        add_cap(&mut mesh, sections[sections.len() - 1], last_offset, true);
    }

    mesh
}

/// Close an end with a quad copied from one section's corners.
fn add_cap(mesh: &mut MeshBuffers, section: RailSection, section_offset: usize, is_end: bool) {
    let normal = if is_end {
        -section.backward()
    } else {
        section.backward()
    };

    let base = mesh.positions.len() as u32;
    for (corner, uv) in [
        Vector2::new(0.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(1.0, 0.0),
    ]
    .into_iter()
    .enumerate()
    {
        let position = mesh.positions[section_offset + corner * 2];
        mesh.push_vertex(position, normal, uv);
    }

    let [c0, c1, c2, c3] = [base, base + 1, base + 2, base + 3];
    if is_end {
        mesh.indices.extend_from_slice(&[[c3, c2, c1], [c1, c0, c3]]);
    } else {
        mesh.indices.extend_from_slice(&[[c0, c1, c2], [c2, c3, c0]]);
    }
}

/// Build a rail mesh along `spline`.
///
/// Knot `i`'s up is its rotation applied to `config.world_up`. Every knot of
/// a closed spline gets a corner sweep; an open spline uses stubs at its
/// first and last knot.
///
/// # Errors
///
/// - [`GenerateError::InvalidTopology`](crate::GenerateError::InvalidTopology)
///   if `corner_segments < 1`.
/// - [`GenerateError::InvalidDimension`](crate::GenerateError::InvalidDimension)
///   for non-positive cross-section size.
/// - [`GenerateError::Curve`](crate::GenerateError::Curve) if two consecutive
///   knots coincide.
///
/// # Example
///
/// ```
/// use curve_types::{Knot, Spline};
/// use mesh_from_curves::{RailConfig, build_rail_mesh};
/// use nalgebra::Point3;
///
/// let spline = Spline::new(
///     vec![Knot::at(Point3::origin()), Knot::at(Point3::new(4.0, 0.0, 0.0))],
///     false,
/// )
/// .unwrap();
/// let mesh = build_rail_mesh(&spline, &RailConfig::default()).unwrap();
///
/// // Two stub sections plus two caps
/// assert_eq!(mesh.vertex_count(), 2 * 8 + 8);
/// assert!((mesh.signed_volume() - 16.0).abs() < 1e-9);
/// ```
pub fn build_rail_mesh(spline: &Spline, config: &RailConfig) -> GenerateResult<MeshBuffers> {
    config.validate()?;
    spline.validate()?;

    let knots = spline.knots();
    let closed = spline.is_closed();
    let last = knots.len() - 1;

    let mut sections = Vec::with_capacity(knots.len() * (config.corner_segments + 1));
    for (i, knot) in knots.iter().enumerate() {
        let up = knot.up(&config.world_up);
        let prev = spline.neighbor(i, -1);
        let next = spline.neighbor(i, 1);

        match (prev, next) {
            (Some(prev), Some(next)) => sections.extend(corner_sweep(
                prev.position,
                knot.position,
                next.position,
                up,
                config.corner_radius,
                config.corner_segments,
            )?),
            _ => {
                // Open end: both stubs face against the end curve's direction.
                let curve = spline.curve(if i == 0 { 0 } else { last - 1 })?;
                sections.push(stub_section(knot.position, curve.p0 - curve.p3, up)?);
            }
        }
    }

    debug!(sections = sections.len(), closed, "Extruding rail sections");

    let mesh = extrude_sections(&sections, config.width, config.height, closed);
    mesh.validate()?;

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Generated rail mesh"
    );

    Ok(mesh)
}
