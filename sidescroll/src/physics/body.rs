use core::fmt;
use std::rc::Rc;

use manyfmt::Refmt as _;

use crate::arena::{Slot, slot_id};
use crate::entity::EntityId;
use crate::math::{Aab, FreePoint, FreeVector};
use crate::physics::Hit;
use crate::util::ConciseDebug;

slot_id! {
    /// Identifies a [`Body`] within a [`PhysicsWorld`](super::PhysicsWorld).
    pub struct BodyId;
}

slot_id! {
    /// Identifies a [`StaticBody`] within a [`PhysicsWorld`](super::PhysicsWorld).
    pub struct StaticBodyId;
}

bitflags::bitflags! {
    /// Set of collision layers.
    ///
    /// Each body is on some layers ([`Body::layer`]) and collides with the layers in
    /// its mask ([`Body::mask`]). A body `a` reacts to `b` when
    /// `a.mask.intersects(b.layer)`; the relation need not be symmetric.
    ///
    /// The meaning of each bit is up to the game; use [`CollisionLayers::layer()`] to
    /// name them.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct CollisionLayers: u8 {
        const _ = !0;
    }
}

impl CollisionLayers {
    /// Every layer.
    pub const ALL: Self = Self::all();

    /// The set containing only layer number `index`, which must be less than 8.
    ///
    /// ```
    /// use sidescroll::physics::CollisionLayers;
    ///
    /// const PLAYER: CollisionLayers = CollisionLayers::layer(0);
    /// const TERRAIN: CollisionLayers = CollisionLayers::layer(2);
    /// assert_eq!((PLAYER | TERRAIN).bits(), 0b101);
    /// ```
    #[track_caller]
    pub const fn layer(index: u8) -> Self {
        assert!(index < 8, "collision layer index out of range");
        Self::from_bits_retain(1 << index)
    }
}

/// Callback invoked when a body overlaps another body whose layer is in its mask.
///
/// Arguments are the host context, the body owning the callback, the other body, and
/// the [`Hit`] describing the contact.
pub type OnHit<H> = Rc<dyn Fn(&mut H, BodyId, BodyId, Hit)>;

/// Callback invoked when a body is stopped by (or, if kinematic, sweeps into) a
/// static body whose layer is in its mask.
pub type OnHitStatic<H> = Rc<dyn Fn(&mut H, BodyId, StaticBodyId, Hit)>;

/// A moving axis-aligned box.
///
/// `H` is the host context passed to hit callbacks; see
/// [`PhysicsHost`](super::PhysicsHost).
#[non_exhaustive]
pub struct Body<H> {
    /// Current position (center) and half-extent.
    pub aab: Aab,
    /// Velocity, in position units per second.
    pub velocity: FreeVector,
    /// Acceleration applied every step, in addition to the world's gravity for
    /// non-kinematic bodies.
    pub acceleration: FreeVector,
    /// Layers this body is on.
    pub layer: CollisionLayers,
    /// Layers this body collides with.
    pub mask: CollisionLayers,
    /// Is this body exempt from gravity and from being stopped or pushed by static
    /// bodies? Kinematic bodies still report hits.
    pub kinematic: bool,
    /// The entity this body belongs to, if any. This is not kept up to date by the
    /// physics world; the entity layer sets it.
    pub entity: Option<EntityId>,
    /// Called for overlaps with other bodies.
    pub on_hit: Option<OnHit<H>>,
    /// Called for contacts with static bodies.
    pub on_hit_static: Option<OnHitStatic<H>>,

    active: bool,
    // When adding a field, don't forget to expand the Debug impl.
}

impl<H> Body<H> {
    /// Constructs an active [`Body`] requiring only information that can't be
    /// reasonably defaulted. It is at rest, non-kinematic, and has no callbacks.
    pub fn new_minimal(aab: Aab, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        Self {
            aab,
            velocity: FreeVector::zero(),
            acceleration: FreeVector::zero(),
            layer,
            mask,
            kinematic: false,
            entity: None,
            on_hit: None,
            on_hit_static: None,
            active: true,
        }
    }

    /// Sets the initial velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: impl Into<FreeVector>) -> Self {
        self.velocity = velocity.into();
        self
    }

    /// Sets the constant acceleration.
    #[must_use]
    pub fn with_acceleration(mut self, acceleration: impl Into<FreeVector>) -> Self {
        self.acceleration = acceleration.into();
        self
    }

    /// Sets whether the body is kinematic. See [`Body::kinematic`].
    #[must_use]
    pub fn with_kinematic(mut self, kinematic: bool) -> Self {
        self.kinematic = kinematic;
        self
    }

    /// Sets the callback for overlaps with other bodies.
    #[must_use]
    pub fn with_on_hit(mut self, callback: impl Fn(&mut H, BodyId, BodyId, Hit) + 'static) -> Self {
        self.on_hit = Some(Rc::new(callback));
        self
    }

    /// Sets the callback for contacts with static bodies.
    #[must_use]
    pub fn with_on_hit_static(
        mut self,
        callback: impl Fn(&mut H, BodyId, StaticBodyId, Hit) + 'static,
    ) -> Self {
        self.on_hit_static = Some(Rc::new(callback));
        self
    }

    /// The center of the body.
    pub fn position(&self) -> FreePoint {
        self.aab.center()
    }

    /// Moves the center of the body to `position`, keeping its size.
    ///
    /// Panics if `position` is not finite.
    #[track_caller]
    pub fn set_position(&mut self, position: impl Into<FreePoint>) {
        self.aab = self.aab.with_center(position.into());
    }

    /// Whether the body has a callback for either kind of hit.
    pub fn has_callbacks(&self) -> bool {
        self.on_hit.is_some() || self.on_hit_static.is_some()
    }
}

impl<H> Slot for Body<H> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

// Manual impl because `H` need not be `Clone`.
impl<H> Clone for Body<H> {
    fn clone(&self) -> Self {
        Self {
            aab: self.aab,
            velocity: self.velocity,
            acceleration: self.acceleration,
            layer: self.layer,
            mask: self.mask,
            kinematic: self.kinematic,
            entity: self.entity,
            on_hit: self.on_hit.clone(),
            on_hit_static: self.on_hit_static.clone(),
            active: self.active,
        }
    }
}

impl<H> fmt::Debug for Body<H> {
    #[mutants::skip]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            aab,
            velocity,
            acceleration,
            layer,
            mask,
            kinematic,
            entity,
            on_hit,
            on_hit_static,
            active,
        } = self;
        fmt.debug_struct("Body")
            .field("aab", aab)
            .field("velocity", &velocity.refmt(&ConciseDebug))
            .field("acceleration", &acceleration.refmt(&ConciseDebug))
            .field("layer", layer)
            .field("mask", mask)
            .field("kinematic", kinematic)
            .field("entity", entity)
            .field("on_hit", &on_hit.is_some())
            .field("on_hit_static", &on_hit_static.is_some())
            .field("active", active)
            .finish()
    }
}

/// An immovable axis-aligned box, such as terrain.
///
/// Static bodies have no callbacks of their own; bodies that hit them are notified.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct StaticBody {
    /// Position and half-extent.
    pub aab: Aab,
    /// Layers this static body is on.
    pub layer: CollisionLayers,
}

impl StaticBody {
    #[allow(missing_docs)]
    pub fn new(aab: Aab, layer: CollisionLayers) -> Self {
        Self { aab, layer }
    }
}

/// Note: Tests which involve both body and collision code are in the parent module.
#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, vec2};

    struct NoHost;

    fn test_body() -> Body<NoHost> {
        Body::new_minimal(
            Aab::new([0.0, 50.0], [5.0, 5.0]),
            CollisionLayers::layer(0),
            CollisionLayers::layer(2),
        )
    }

    #[test]
    fn builder() {
        let body = test_body()
            .with_velocity([1.0, 2.0])
            .with_acceleration([0.0, -3.0])
            .with_kinematic(true)
            .with_on_hit(|_, _, _, _| {});
        assert_eq!(body.velocity, vec2(1.0, 2.0));
        assert_eq!(body.acceleration, vec2(0.0, -3.0));
        assert!(body.kinematic);
        assert!(body.on_hit.is_some());
        assert!(body.on_hit_static.is_none());
        assert!(body.has_callbacks());
        assert!(body.is_active());
    }

    #[test]
    fn set_position_keeps_size() {
        let mut body = test_body();
        body.set_position([10.0, 20.0]);
        assert_eq!(body.position(), point2(10.0, 20.0));
        assert_eq!(body.aab.half_size(), vec2(5.0, 5.0));
    }

    #[test]
    fn layer_bits() {
        assert_eq!(CollisionLayers::layer(0).bits(), 1);
        assert_eq!(CollisionLayers::layer(4).bits(), 16);
        assert_eq!(CollisionLayers::ALL.bits(), 0xFF);
        assert!(!CollisionLayers::layer(1).intersects(CollisionLayers::layer(2)));
        assert!(CollisionLayers::empty().is_empty());
    }

    #[test]
    #[should_panic = "collision layer index out of range"]
    fn layer_out_of_range() {
        let _ = CollisionLayers::layer(8);
    }

    #[test]
    fn debug_omits_closures() {
        let body = test_body().with_on_hit_static(|_, _, _, _| {});
        assert_eq!(
            format!("{body:#?}\n"),
            indoc::indoc! {"
                Body {
                    aab: Aab {
                        center: (+0.000, +50.000),
                        half_size: (+5.000, +5.000),
                    },
                    velocity: (+0.000, +0.000),
                    acceleration: (+0.000, +0.000),
                    layer: CollisionLayers(
                        0x1,
                    ),
                    mask: CollisionLayers(
                        0x4,
                    ),
                    kinematic: false,
                    entity: None,
                    on_hit: false,
                    on_hit_static: true,
                    active: true,
                }
            "}
        );
    }
}
