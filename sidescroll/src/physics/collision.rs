//! Pure collision math over axis-aligned boxes: overlap, Minkowski difference,
//! penetration vectors, and swept ray tests.

use core::fmt;

use euclid::vec2;
use manyfmt::Refmt as _;

use crate::math::{Aab, Axis, Face4, FreeCoordinate, FreePoint, FreeVector};
use crate::physics::{BodyId, StaticBodyId};
use crate::ray::Ray;
use crate::util::ConciseDebug;

/// Identifies the other participant of a [`Hit`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum Collider {
    /// A static body, i.e. terrain.
    Static(StaticBodyId),
    /// A dynamic body (including triggers).
    Body(BodyId),
}

/// Result of a swept or overlap collision test.
///
/// When [`is_hit`](Self::is_hit) is false, [`time`](Self::time) is 1, the
/// [`normal`](Self::normal) is zero, and [`position`](Self::position) is the end of the
/// swept segment. When it is true, the normal is an axis-aligned unit vector pointing
/// in the direction the moving box must go to leave the obstacle.
#[derive(Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct Hit {
    /// Fraction of the swept segment travelled before contact, in `[0, 1]`.
    pub time: FreeCoordinate,
    /// Position of the swept point at the time of contact.
    ///
    /// For hits reported by the physics step, this is the moving body's center.
    pub position: FreePoint,
    /// Contact normal; zero if there was no contact.
    pub normal: FreeVector,
    /// What was hit, if known. Pure geometric tests leave this as [`None`].
    pub other: Option<Collider>,
    /// Whether there was a contact at all.
    pub is_hit: bool,
}

impl Hit {
    /// A [`Hit`] reporting no contact along a segment ending at `endpoint`.
    pub fn miss(endpoint: FreePoint) -> Self {
        Self {
            time: 1.0,
            position: endpoint,
            normal: FreeVector::zero(),
            other: None,
            is_hit: false,
        }
    }

    /// Returns the face of the obstacle that was hit, which is the direction of the
    /// [`normal`](Self::normal), or [`None`] if there was no contact.
    pub fn face(&self) -> Option<Face4> {
        if self.is_hit {
            Face4::from_unit_vector(self.normal)
        } else {
            None
        }
    }

    #[must_use]
    pub(crate) fn with_other(self, other: Collider) -> Self {
        Self {
            other: Some(other),
            ..self
        }
    }
}

impl fmt::Debug for Hit {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self {
            time,
            position,
            normal,
            other,
            is_hit,
        } = self;
        f.debug_struct("Hit")
            .field("is_hit", &is_hit)
            .field("time", &time)
            .field("position", &position.refmt(&ConciseDebug))
            .field("normal", &normal.refmt(&ConciseDebug))
            .field("other", &other)
            .finish()
    }
}

/// Returns whether `point` lies strictly inside `aab`.
///
/// Boundaries are open: a point on an edge is outside. This is the same policy as
/// [`aab_overlap()`], so that `aab_overlap(a, b)` equals
/// `point_in_aab(origin, minkowski_difference(a, b))` for all boxes.
pub fn point_in_aab(point: FreePoint, aab: Aab) -> bool {
    aab.contains(point)
}

/// Returns whether the interiors of the two boxes overlap.
///
/// Boxes which merely touch do not overlap.
pub fn aab_overlap(a: Aab, b: Aab) -> bool {
    a.intersects(b)
}

/// Returns the box centered at `a.center - b.center` whose half-extent is the sum of
/// both half-extents.
///
/// The origin lies inside the result exactly when `a` and `b` overlap. If `a` is a
/// stationary obstacle and `b` moves by `d`, then `b` touches `a` when the point `d`
/// enters the result, so a moving-box test reduces to [`ray_vs_aab()`] from the origin.
pub fn minkowski_difference(a: Aab, b: Aab) -> Aab {
    Aab::new(
        a.center() - b.center().to_vector(),
        a.half_size() + b.half_size(),
    )
}

/// Given a Minkowski difference that contains the origin, returns the shortest
/// axis-aligned vector that moves the origin onto the nearest face.
///
/// With `diff = minkowski_difference(obstacle, mover)`, translating `mover` by the
/// result separates the two boxes.
///
/// Ties are resolved in a fixed order: vertical before horizontal, which keeps bodies
/// standing on platforms rather than being shoved sideways; within the vertical
/// axis, up (+Y) before down; within the horizontal axis, −X before +X.
pub fn penetration_vector(diff: Aab) -> FreeVector {
    let min = diff.min();
    let max = diff.max();
    // In order of preference; later candidates must be strictly shorter to win.
    let candidates = [
        vec2(0.0, max.y),
        vec2(0.0, min.y),
        vec2(min.x, 0.0),
        vec2(max.x, 0.0),
    ];
    let mut best: FreeVector = candidates[0];
    let mut best_distance = max.y.abs();
    for candidate in &candidates[1..] {
        let distance = candidate.x.abs() + candidate.y.abs();
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    best
}

/// Converts a penetration vector to the unit contact normal along its nonzero axis.
pub(crate) fn normal_of_penetration(penetration: FreeVector) -> FreeVector {
    if penetration.x != 0.0 {
        vec2(penetration.x.signum(), 0.0)
    } else if penetration.y != 0.0 {
        vec2(0.0, penetration.y.signum())
    } else {
        FreeVector::zero()
    }
}

/// Sweeps the segment from `ray.origin` to `ray.unit_endpoint()` against `aab` using
/// the slab method.
///
/// * If the segment enters the box at parameter `t ∈ [0, 1)`, returns a hit with that
///   `time`, the entry position, and the normal of the entered face (opposing the
///   direction of motion on that axis). When both axes are entered at the same time
///   (a corner), the vertical face is reported.
/// * If the origin is already strictly inside, returns a hit with `time = 0` and the
///   normal of the nearest face, as given by [`penetration_vector()`].
/// * Otherwise, including when the segment only touches the boundary, when it ends
///   before reaching the box, or when it has zero length outside the box, returns
///   [`Hit::miss()`].
pub fn ray_vs_aab(ray: Ray, aab: Aab) -> Hit {
    let min = aab.min();
    let max = aab.max();
    let mut last_entry = FreeCoordinate::NEG_INFINITY;
    let mut first_exit = FreeCoordinate::INFINITY;
    let mut entry_axis: Option<Axis> = None;

    // Y first so that it keeps a tie with X.
    for axis in [Axis::Y, Axis::X] {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        if direction == 0.0 {
            // Parallel to this slab; never enters or leaves it.
            if origin <= min[axis] || origin >= max[axis] {
                return Hit::miss(ray.unit_endpoint());
            }
            continue;
        }
        let t_min = (min[axis] - origin) / direction;
        let t_max = (max[axis] - origin) / direction;
        let (near, far) = if t_min <= t_max {
            (t_min, t_max)
        } else {
            (t_max, t_min)
        };
        if near > last_entry {
            last_entry = near;
            entry_axis = Some(axis);
        }
        first_exit = first_exit.min(far);
    }

    if !(first_exit > last_entry && first_exit > 0.0 && last_entry < 1.0) {
        return Hit::miss(ray.unit_endpoint());
    }

    match entry_axis {
        Some(axis) if last_entry >= 0.0 => {
            let mut normal = FreeVector::zero();
            normal[axis] = -ray.direction[axis].signum();
            Hit {
                time: last_entry,
                position: ray.point_at(last_entry),
                normal,
                other: None,
                is_hit: true,
            }
        }
        _ => {
            // Started inside.
            let penetration = penetration_vector(aab.translate(-ray.origin.to_vector()));
            Hit {
                time: 0.0,
                position: ray.origin,
                normal: normal_of_penetration(penetration),
                other: None,
                is_hit: true,
            }
        }
    }
}
