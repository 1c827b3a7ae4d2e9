//! [`Scene`], the context object holding everything that is simulated together.

use crate::animation::{AnimationId, Animations};
use crate::arena::{OutOfRange, Slot as _};
use crate::entity::{Entities, Entity, EntityId};
use crate::math::FreeVector;
use crate::physics::{self, Body, PhysicsConfig, PhysicsHost, PhysicsStepInfo, PhysicsWorld};
use crate::time::Tick;

/// A physics world, the entities in it, and their animations.
///
/// `D` is the game's per-entity data. Hit callbacks receive the whole scene, so they
/// can look up the entity for a body, change animations, or spawn new entities.
///
/// ```
/// use sidescroll::math::Aab;
/// use sidescroll::physics::{Body, CollisionLayers};
/// use sidescroll::scene::Scene;
/// use sidescroll::time::Tick;
///
/// const TERRAIN: CollisionLayers = CollisionLayers::layer(2);
///
/// let mut scene = Scene::<()>::default();
/// scene
///     .physics
///     .create_static_body(Aab::new([0.0, 0.0], [50.0, 10.0]), TERRAIN);
/// let player = scene.create_entity(
///     Body::new_minimal(Aab::new([0.0, 50.0], [5.0, 5.0]), CollisionLayers::layer(0), TERRAIN)
///         .with_velocity([0.0, -500.0]),
///     None,
///     [0.0, 0.0],
///     (),
/// );
///
/// scene.step(Tick::from_seconds(0.2));
///
/// let body = scene.physics.body(scene.entity(player).body);
/// assert!((body.position().y - 15.0).abs() < 1e-5);
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct Scene<D> {
    /// Bodies, including those of entities.
    pub physics: PhysicsWorld<Scene<D>>,
    /// Game objects.
    pub entities: Entities<D>,
    /// Animation definitions and instances.
    pub animations: Animations,
}

impl<D> Scene<D> {
    /// Constructs an empty scene.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            physics: PhysicsWorld::new(config),
            entities: Entities::new(),
            animations: Animations::new(),
        }
    }

    /// Advances physics, then animations, by one step.
    ///
    /// A paused or zero-length `tick` changes nothing.
    pub fn step(&mut self, tick: Tick) -> PhysicsStepInfo {
        let info = physics::step(self, tick);
        if !tick.is_idle() {
            self.animations.update(tick.delta_t());
        }
        info
    }

    /// Creates an entity and its body. See [`Entities::create()`].
    pub fn create_entity(
        &mut self,
        body: Body<Self>,
        animation: Option<AnimationId>,
        sprite_offset: impl Into<FreeVector>,
        data: D,
    ) -> EntityId {
        self.entities
            .create(&mut self.physics, body, animation, sprite_offset, data)
    }

    /// Deactivates an entity, its body, and its animation instance.
    ///
    /// Destroying an already inactive entity has no effect.
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<(), OutOfRange> {
        let entity = self.entities.try_get(id)?;
        if !entity.is_active() {
            return Ok(());
        }
        let animation = entity.animation;
        self.entities.destroy(&mut self.physics, id)?;
        if let Some(animation) = animation {
            self.animations.destroy(animation)?;
        }
        Ok(())
    }

    /// Returns the entity with the given id.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn entity(&self, id: EntityId) -> &Entity<D> {
        self.entities.get(id)
    }

    /// Returns the entity with the given id for modification.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity<D> {
        self.entities.get_mut(id)
    }

    /// Removes all bodies, static bodies, entities, and animation instances, as when
    /// reloading a level. Animation definitions are kept.
    pub fn reset(&mut self) {
        self.physics.reset();
        self.entities.reset();
        self.animations.reset();
    }
}

impl<D> Default for Scene<D> {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl<D> PhysicsHost for Scene<D> {
    fn physics(&self) -> &PhysicsWorld<Self> {
        &self.physics
    }

    fn physics_mut(&mut self) -> &mut PhysicsWorld<Self> {
        &mut self.physics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SheetId;
    use crate::arena::Slot as _;
    use crate::math::Aab;
    use crate::physics::CollisionLayers;

    const LAYER: CollisionLayers = CollisionLayers::layer(0);

    fn body(x: f64) -> Body<Scene<u32>> {
        Body::new_minimal(Aab::new([x, 0.0], [1.0, 1.0]), LAYER, CollisionLayers::empty())
    }

    #[test]
    fn step_advances_animations_unless_idle() {
        let mut scene = Scene::<u32>::default();
        let def = scene
            .animations
            .create_definition(SheetId::new(0), 0.1, 0, &[0, 1]);
        let animation = scene.animations.create(def, true);
        scene.create_entity(body(0.0), Some(animation), [0.0, 0.0], 0);

        scene.step(Tick::from_seconds(0.1).pause());
        assert_eq!(scene.animations.get(animation).frame_index(), 0);
        scene.step(Tick::from_seconds(0.1));
        assert_eq!(scene.animations.get(animation).frame_index(), 1);
    }

    #[test]
    fn destroy_entity_destroys_parts() {
        let mut scene = Scene::<u32>::default();
        let def = scene
            .animations
            .create_definition(SheetId::new(0), 0.1, 0, &[0]);
        let animation = scene.animations.create(def, true);
        let id = scene.create_entity(body(0.0), Some(animation), [0.0, 0.0], 7);
        let body_id = scene.entity(id).body;

        scene.destroy_entity(id).unwrap();

        assert!(!scene.entity(id).is_active());
        assert!(!scene.physics.body(body_id).is_active());
        assert!(!scene.animations.get(animation).is_active());
        assert!(scene.destroy_entity(EntityId::new(9)).is_err());
    }

    #[test]
    fn callbacks_can_reach_entity_data() {
        let mut scene = Scene::<u32>::default();
        scene.physics.create_static_body(
            Aab::new([0.0, -10.0], [10.0, 1.0]),
            CollisionLayers::layer(2),
        );
        let id = scene.create_entity(
            Body::new_minimal(Aab::new([0.0, 0.0], [1.0, 1.0]), LAYER, CollisionLayers::layer(2))
                .with_velocity([0.0, -100.0])
                .with_on_hit_static(|scene: &mut Scene<u32>, this, _, _| {
                    let entity = scene.physics.body(this).entity.unwrap();
                    scene.entity_mut(entity).data += 1;
                }),
            None,
            [0.0, 0.0],
            0,
        );

        scene.step(Tick::from_seconds(0.5));

        assert_eq!(scene.entity(id).data, 1);
    }

    #[test]
    fn reset_clears_all_pools() {
        let mut scene = Scene::<u32>::default();
        let def = scene
            .animations
            .create_definition(SheetId::new(0), 0.1, 0, &[0]);
        let animation = scene.animations.create(def, true);
        scene.create_entity(body(0.0), Some(animation), [0.0, 0.0], 0);
        scene.physics.create_static_body(Aab::new([0.0, 0.0], [1.0, 1.0]), LAYER);

        scene.reset();

        assert_eq!(scene.physics.body_count(), 0);
        assert_eq!(scene.physics.static_body_count(), 0);
        assert_eq!(scene.entities.count(), 0);
        assert_eq!(scene.animations.count(), 0);
        assert_eq!(scene.animations.create(def, false), AnimationId::new(0));
    }
}
