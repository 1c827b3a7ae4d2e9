use core::fmt;

use euclid::Vector2D;

use crate::arena::{OutOfRange, Slot as _, SlotStore};
use crate::math::{Aab, NotNan, Px};
use crate::physics::{Body, BodyId, CollisionLayers, Hit, StaticBody, StaticBodyId};

/// Tunable parameters of a [`PhysicsWorld`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct PhysicsConfig {
    /// Acceleration applied to every non-kinematic body, in addition to its own.
    ///
    /// The default is zero; a platformer typically uses something like `(0, -900)`.
    pub gravity: Vector2D<NotNan<f64>, Px>,

    /// Maximum downward speed a body can reach by integration, if any.
    pub terminal_velocity: Option<NotNan<f64>>,
}

impl PhysicsConfig {
    /// Constructs a configuration with the given gravity and no terminal velocity.
    pub fn new(gravity: Vector2D<NotNan<f64>, Px>) -> Self {
        Self {
            gravity,
            terminal_velocity: None,
        }
    }

    /// Sets the maximum downward speed. Its sign is ignored.
    #[must_use]
    pub fn with_terminal_velocity(mut self, speed: NotNan<f64>) -> Self {
        self.terminal_velocity = Some(if speed.into_inner() < 0.0 { -speed } else { speed });
        self
    }
}

/// The set of dynamic and static bodies that are simulated together by
/// [`step()`](super::step).
///
/// `H` is the host context which [`OnHit`](super::OnHit) callbacks receive; it is
/// usually a [`Scene`](crate::scene::Scene), which owns this world.
///
/// Dynamic bodies may be destroyed and their slots reused; static bodies are never
/// removed except by [`reset()`](Self::reset).
pub struct PhysicsWorld<H> {
    config: PhysicsConfig,
    pub(crate) bodies: SlotStore<Body<H>>,
    pub(crate) static_bodies: SlotStore<StaticBody>,
}

impl<H> PhysicsWorld<H> {
    /// Constructs an empty world.
    pub const fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: SlotStore::new("body"),
            static_bodies: SlotStore::new("static body"),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replaces the configuration. It takes effect on the next step.
    pub fn set_config(&mut self, config: PhysicsConfig) {
        self.config = config;
    }

    /// Adds a dynamic body, reusing the slot of a destroyed body if there is one.
    pub fn create_body(&mut self, body: Body<H>) -> BodyId {
        BodyId::new(self.bodies.create(body))
    }

    /// Adds a trigger: a kinematic body at rest which only reports overlaps, such as a
    /// kill zone.
    pub fn create_trigger(
        &mut self,
        aab: Aab,
        layer: CollisionLayers,
        mask: CollisionLayers,
        on_hit: impl Fn(&mut H, BodyId, BodyId, Hit) + 'static,
    ) -> BodyId {
        self.create_body(
            Body::new_minimal(aab, layer, mask)
                .with_kinematic(true)
                .with_on_hit(on_hit),
        )
    }

    /// Adds a static body.
    pub fn create_static_body(&mut self, aab: Aab, layer: CollisionLayers) -> StaticBodyId {
        StaticBodyId::new(self.static_bodies.append(StaticBody::new(aab, layer)))
    }

    /// Returns the body with the given id, active or not.
    ///
    /// Panics if the id is out of range, which means it was obtained from a different
    /// world or before a [`reset()`](Self::reset).
    #[track_caller]
    pub fn body(&self, id: BodyId) -> &Body<H> {
        &self.bodies[id.index()]
    }

    /// Returns the body with the given id for modification, active or not.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn body_mut(&mut self, id: BodyId) -> &mut Body<H> {
        &mut self.bodies[id.index()]
    }

    /// Returns the body with the given id, or an error if it is out of range.
    pub fn try_body(&self, id: BodyId) -> Result<&Body<H>, OutOfRange> {
        self.bodies.get(id.index())
    }

    /// Returns the static body with the given id.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn static_body(&self, id: StaticBodyId) -> &StaticBody {
        &self.static_bodies[id.index()]
    }

    /// Returns the static body with the given id, or an error if it is out of range.
    pub fn try_static_body(&self, id: StaticBodyId) -> Result<&StaticBody, OutOfRange> {
        self.static_bodies.get(id.index())
    }

    /// Deactivates a body so that it is no longer simulated, and makes its slot
    /// available for reuse. The body's callbacks are dropped.
    ///
    /// Destroying an already inactive body has no effect.
    pub fn destroy_body(&mut self, id: BodyId) -> Result<(), OutOfRange> {
        let body = self.bodies.get_mut(id.index())?;
        if body.is_active() {
            body.deactivate();
            body.on_hit = None;
            body.on_hit_static = None;
        }
        Ok(())
    }

    /// Number of body slots, active or not. Valid [`BodyId`]s are less than this.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of static bodies.
    pub fn static_body_count(&self) -> usize {
        self.static_bodies.len()
    }

    /// Iterates over active bodies in ascending id order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body<H>)> {
        self.bodies
            .iter_active()
            .map(|(index, body)| (BodyId::new(index), body))
    }

    /// Iterates over static bodies in ascending id order.
    pub fn static_bodies(&self) -> impl Iterator<Item = (StaticBodyId, &StaticBody)> {
        self.static_bodies
            .iter()
            .map(|(index, body)| (StaticBodyId::new(index), body))
    }

    /// Removes all bodies. Every previously returned id becomes invalid.
    pub fn reset(&mut self) {
        self.bodies.reset();
        self.static_bodies.reset();
    }
}

impl<H> Default for PhysicsWorld<H> {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl<H> fmt::Debug for PhysicsWorld<H> {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            config,
            bodies,
            static_bodies,
        } = self;
        f.debug_struct("PhysicsWorld")
            .field("config", config)
            .field("bodies", bodies)
            .field("static_bodies", static_bodies)
            .finish()
    }
}
