//! The per-frame physics update.

use core::fmt;
use core::ops;

use manyfmt::Refmt as _;

use crate::arena::{Slot as _, SlotStore};
use crate::math::{Aab, Face4, FreeVector, vector_into_inner, vector_is_finite};
use crate::physics::{
    Body, BodyId, Collider, CollisionLayers, Hit, POSITION_EPSILON, PhysicsConfig,
    PhysicsWorld, StaticBody,
    VELOCITY_EPSILON_SQUARED, VELOCITY_MAGNITUDE_LIMIT, VELOCITY_MAGNITUDE_LIMIT_SQUARED,
    aab_overlap, minkowski_difference, normal_of_penetration, penetration_vector, ray_vs_aab,
};
use crate::ray::Ray;
use crate::time::Tick;
use crate::util::ConciseDebug;

/// A context which owns a [`PhysicsWorld`] whose callbacks receive that context.
///
/// [`step()`] borrows the world only between callbacks, and passes the whole host to
/// each callback, so that callbacks may freely modify bodies and anything else the
/// host owns.
pub trait PhysicsHost: Sized {
    /// Returns the physics world.
    fn physics(&self) -> &PhysicsWorld<Self>;
    /// Returns the physics world for modification.
    fn physics_mut(&mut self) -> &mut PhysicsWorld<Self>;
}

/// Advances every active body in `host`'s physics world by one fixed step.
///
/// Bodies are processed one at a time in ascending [`BodyId`] order. For each body:
///
/// 1. Velocity is integrated from the body's acceleration and, unless it is kinematic,
///    the world's gravity; then clamped to the terminal velocity (downward, for
///    non-kinematic bodies) and to a sanity limit.
/// 2. If the body is moving, its displacement for the step is swept against every
///    static body whose layer is in its mask and which it is not already overlapping.
///    A non-kinematic body stops at the earliest contact (ties go to the lower
///    [`StaticBodyId`]), backs off [`POSITION_EPSILON`] along the contact normal,
///    loses its velocity along that axis, and slides along the other axis for the
///    rest of the step. A kinematic body moves the whole displacement regardless.
///    [`Body::on_hit_static`] is called for each contact that stopped the body, or,
///    for kinematic bodies, for the earliest contact.
/// 3. A non-kinematic body that is left overlapping static geometry in its mask is
///    pushed out along the shortest axis. No callback is made for this.
/// 4. Every active body with a lower id which overlaps this one is checked. If either
///    body's mask contains the other's layer, the overlap is reported to the
///    [`Body::on_hit`] of each side whose mask matches, lower id first. Since this
///    happens after both bodies have moved, each pair is reported at most once per
///    step, whichever of the two moved into the other. No separation is applied; that
///    is up to the callbacks.
///
/// Callbacks run synchronously and may create, modify, or destroy bodies. Iteration
/// follows the live length of the body pool, so a body appended during the step is
/// stepped in the same step, while a reused slot before the current one waits for the
/// next step. If a callback deactivates the body it was called for, processing of that
/// body ends there.
///
/// A paused or zero-length `tick` changes nothing.
pub fn step<H: PhysicsHost>(host: &mut H, tick: Tick) -> PhysicsStepInfo {
    let mut info = PhysicsStepInfo::default();
    if tick.is_idle() {
        return info;
    }
    let dt = tick.delta_t();

    let mut index = 0;
    while index < host.physics().bodies.len() {
        let id = BodyId::new(index);
        index += 1;
        if !host.physics().bodies[id.index()].is_active() {
            continue;
        }
        step_body(host, id, dt, &mut info);
    }
    info
}

fn step_body<H: PhysicsHost>(host: &mut H, id: BodyId, dt: f64, info: &mut PhysicsStepInfo) {
    info.bodies_stepped += 1;

    let config = *host.physics().config();
    let body = host.physics_mut().body_mut(id);
    integrate(body, &config, dt);
    let kinematic = body.kinematic;
    let velocity = body.velocity;

    if velocity.square_length() <= VELOCITY_EPSILON_SQUARED {
        info.quiescent += 1;
    } else {
        let displacement = velocity * dt;
        let alive = if kinematic {
            sweep_kinematic(host, id, displacement, info)
        } else {
            sweep_and_slide(host, id, displacement, info)
        };
        if !alive {
            return;
        }
    }

    if !kinematic {
        let world = host.physics_mut();
        push_out(&mut world.bodies[id.index()], &world.static_bodies, info);
    }

    collide_with_bodies(host, id, info);
}

/// Updates `body.velocity` for one step.
fn integrate<H>(body: &mut Body<H>, config: &PhysicsConfig, dt: f64) {
    let mut acceleration = body.acceleration;
    if !body.kinematic {
        acceleration += vector_into_inner(config.gravity);
    }
    body.velocity += acceleration * dt;

    if !vector_is_finite(body.velocity) {
        log::warn!(
            "body velocity {:?} is not finite; resetting to zero",
            body.velocity.refmt(&ConciseDebug)
        );
        body.velocity = FreeVector::zero();
        return;
    }

    if !body.kinematic {
        if let Some(limit) = config.terminal_velocity {
            body.velocity.y = body.velocity.y.max(-limit.into_inner());
        }
    }

    let magnitude_squared = body.velocity.square_length();
    if magnitude_squared > VELOCITY_MAGNITUDE_LIMIT_SQUARED {
        body.velocity *= VELOCITY_MAGNITUDE_LIMIT / magnitude_squared.sqrt();
    }
}

/// Finds the earliest contact of `aab` moving by `displacement` with a static body
/// that `mask` collides with and that `aab` does not already overlap.
fn earliest_static_contact<H>(
    world: &PhysicsWorld<H>,
    aab: Aab,
    mask: CollisionLayers,
    displacement: FreeVector,
) -> Option<Hit> {
    let ray = Ray::new([0.0, 0.0], displacement);
    let mut earliest: Option<Hit> = None;
    for (static_id, static_body) in world.static_bodies() {
        if !mask.intersects(static_body.layer) || aab_overlap(static_body.aab, aab) {
            continue;
        }
        let hit = ray_vs_aab(ray, minkowski_difference(static_body.aab, aab));
        // Strict comparison keeps the lowest index on a tie.
        if hit.is_hit && earliest.is_none_or(|e| hit.time < e.time) {
            earliest = Some(Hit {
                // Convert from relative to world position of the body's center.
                position: aab.center() + hit.position.to_vector(),
                ..hit.with_other(Collider::Static(static_id))
            });
        }
    }
    earliest
}

/// Moves a non-kinematic body by `displacement`, stopping and sliding at static
/// obstacles. Returns false if a callback deactivated the body.
fn sweep_and_slide<H: PhysicsHost>(
    host: &mut H,
    id: BodyId,
    mut remaining: FreeVector,
    info: &mut PhysicsStepInfo,
) -> bool {
    // Each contact removes one axis of the remaining displacement, so in two dimensions
    // there are at most two segments.
    for _ in 0..2 {
        if remaining == FreeVector::zero() {
            break;
        }
        let body = host.physics().body(id);
        let Some(hit) = earliest_static_contact(host.physics(), body.aab, body.mask, remaining)
        else {
            move_body(host.physics_mut().body_mut(id), remaining);
            break;
        };
        let Some(face) = Face4::from_unit_vector(hit.normal) else {
            // Not expected from ray_vs_aab, but don't get stuck.
            move_body(host.physics_mut().body_mut(id), remaining);
            break;
        };
        let axis = face.axis();

        // Advance to the contact, then back off slightly so that we are not overlapping
        // due to rounding on the next step.
        let advance = remaining * hit.time + hit.normal * POSITION_EPSILON;
        let body = host.physics_mut().body_mut(id);
        move_body(body, advance);
        remaining -= remaining * hit.time;
        remaining[axis] = 0.0;
        body.velocity[axis] = 0.0;

        info.static_contacts += 1;
        log::trace!("{id:?} stopped by {:?} with normal {face:?}", hit.other);

        if !notify_static(host, id, hit) {
            return false;
        }
    }
    true
}

/// Moves a kinematic body by the full `displacement`, reporting its earliest static
/// contact. Returns false if a callback deactivated the body.
fn sweep_kinematic<H: PhysicsHost>(
    host: &mut H,
    id: BodyId,
    displacement: FreeVector,
    info: &mut PhysicsStepInfo,
) -> bool {
    let body = host.physics().body(id);
    let contact = earliest_static_contact(host.physics(), body.aab, body.mask, displacement);
    move_body(host.physics_mut().body_mut(id), displacement);
    match contact {
        Some(hit) => {
            info.static_contacts += 1;
            log::trace!("kinematic {id:?} passed through {:?}", hit.other);
            notify_static(host, id, hit)
        }
        None => true,
    }
}

/// Calls the body's [`Body::on_hit_static`], if any, with a static-body `hit`.
/// Returns whether the body is still active afterward.
fn notify_static<H: PhysicsHost>(host: &mut H, id: BodyId, hit: Hit) -> bool {
    let Some(Collider::Static(static_id)) = hit.other else {
        return true;
    };
    // Clone the callback so the host may be borrowed mutably while it runs.
    let Some(callback) = host.physics().body(id).on_hit_static.clone() else {
        return true;
    };
    callback(host, id, static_id, hit);
    is_still_active(host, id)
}

fn is_still_active<H: PhysicsHost>(host: &H, id: BodyId) -> bool {
    host.physics()
        .try_body(id)
        .is_ok_and(|body| body.is_active())
}

/// Translates the body, refusing (with a warning) to move it to a non-finite position.
fn move_body<H>(body: &mut Body<H>, offset: FreeVector) {
    match Aab::try_new(body.aab.center() + offset, body.aab.half_size()) {
        Ok(aab) => body.aab = aab,
        Err(error) => log::warn!("not moving body: {error}"),
    }
}

/// Separates a non-kinematic body from any static bodies it strictly overlaps.
fn push_out<H>(
    body: &mut Body<H>,
    static_bodies: &SlotStore<StaticBody>,
    info: &mut PhysicsStepInfo,
) {
    for (static_index, static_body) in static_bodies.iter() {
        if !body.mask.intersects(static_body.layer) || !aab_overlap(static_body.aab, body.aab) {
            continue;
        }
        let penetration = penetration_vector(minkowski_difference(static_body.aab, body.aab));
        let normal = normal_of_penetration(penetration);
        move_body(body, penetration + normal * POSITION_EPSILON);
        info.push_outs += 1;
        log::trace!(
            "pushed body out of static body {static_index} by {:?}",
            penetration.refmt(&ConciseDebug)
        );
    }
}

/// Reports overlaps between body `id` and every active body with a lower id.
///
/// Each pair is examined only in the pass of its higher-indexed body, which comes after
/// both bodies have moved, so it is reported at most once per step. Both sides are
/// notified, each only if the other's layer is in its mask, lower id first.
fn collide_with_bodies<H: PhysicsHost>(host: &mut H, id: BodyId, info: &mut PhysicsStepInfo) {
    for other_index in 0..id.index() {
        let other_id = BodyId::new(other_index);

        let world = host.physics();
        let this = world.body(id);
        let other = world.body(other_id);
        if !other.is_active() || !aab_overlap(this.aab, other.aab) {
            continue;
        }
        let this_reacts = this.mask.intersects(other.layer);
        let other_reacts = other.mask.intersects(this.layer);
        if !this_reacts && !other_reacts {
            continue;
        }

        info.dynamic_contacts += usize::from(this_reacts) + usize::from(other_reacts);
        log::trace!("{id:?} overlaps {other_id:?}");

        // Normal along which `this` would leave `other`; `other` gets the mirror image.
        let normal = normal_of_penetration(penetration_vector(minkowski_difference(
            other.aab, this.aab,
        )));
        let this_hit = Hit {
            time: 0.0,
            position: this.aab.center(),
            normal,
            other: Some(Collider::Body(other_id)),
            is_hit: true,
        };
        let other_hit = Hit {
            position: other.aab.center(),
            normal: -normal,
            other: Some(Collider::Body(id)),
            ..this_hit
        };
        let this_callback = this.on_hit.clone().filter(|_| this_reacts);
        let other_callback = other.on_hit.clone().filter(|_| other_reacts);

        if let Some(callback) = other_callback {
            callback(host, other_id, id, other_hit);
            if !is_still_active(host, id) {
                return;
            }
        }
        if let Some(callback) = this_callback {
            callback(host, id, other_id, this_hit);
            if !is_still_active(host, id) {
                return;
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Performance data returned by [`step()`]. Use `Display` to format it.
///
/// Values from successive steps may be combined with `+=`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct PhysicsStepInfo {
    /// Number of active bodies processed.
    pub bodies_stepped: usize,
    /// Of those, how many were at rest (not swept).
    pub quiescent: usize,
    /// Number of contacts with static bodies, whether or not a callback was present.
    pub static_contacts: usize,
    /// Number of overlaps between bodies reported, counting each side whose mask matched,
    /// whether or not a callback was present.
    pub dynamic_contacts: usize,
    /// Number of times a body was pushed out of static geometry it was overlapping.
    pub push_outs: usize,
}

impl ops::AddAssign for PhysicsStepInfo {
    fn add_assign(&mut self, other: Self) {
        let Self {
            bodies_stepped,
            quiescent,
            static_contacts,
            dynamic_contacts,
            push_outs,
        } = other;
        self.bodies_stepped += bodies_stepped;
        self.quiescent += quiescent;
        self.static_contacts += static_contacts;
        self.dynamic_contacts += dynamic_contacts;
        self.push_outs += push_outs;
    }
}

impl fmt::Display for PhysicsStepInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            bodies_stepped,
            quiescent,
            static_contacts,
            dynamic_contacts,
            push_outs,
        } = self;
        write!(
            f,
            "{bodies_stepped} bodies ({quiescent} at rest), \
            {static_contacts} static contacts, {dynamic_contacts} body overlaps, \
            {push_outs} push-outs"
        )
    }
}
