//! Game objects: a physics body plus presentation and game-defined data.

use crate::animation::AnimationId;
use crate::arena::{OutOfRange, Slot, SlotStore, slot_id};
use crate::math::{FreePoint, FreeVector};
use crate::physics::{Body, BodyId, PhysicsWorld};

slot_id! {
    /// Identifies an [`Entity`] within an [`Entities`] pool.
    pub struct EntityId;
}

/// A game object: a body in a [`PhysicsWorld`], optionally an animation to draw it
/// with, and data `D` which the game defines (such as “is enraged” flags).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Entity<D> {
    /// The body simulating this entity.
    pub body: BodyId,
    /// The animation instance drawing this entity, if any.
    pub animation: Option<AnimationId>,
    /// Offset from the body's center at which the sprite is drawn.
    pub sprite_offset: FreeVector,
    /// Game-defined data.
    pub data: D,
    active: bool,
}

impl<D> Entity<D> {
    /// Returns where this entity's sprite should be drawn, given the world containing
    /// its body.
    ///
    /// Panics if the body id is invalid for `physics`.
    #[track_caller]
    pub fn sprite_position<H>(&self, physics: &PhysicsWorld<H>) -> FreePoint {
        physics.body(self.body).position() + self.sprite_offset
    }
}

impl<D> Slot for Entity<D> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Pool of [`Entity`] records.
///
/// Entities are created together with their body, and reuse the slots of destroyed
/// entities. The pool does not own the [`PhysicsWorld`]; callers pass it in, and must
/// reset both together.
#[derive(Clone, Debug)]
pub struct Entities<D> {
    entities: SlotStore<Entity<D>>,
}

impl<D> Entities<D> {
    /// Constructs an empty pool.
    pub const fn new() -> Self {
        Self {
            entities: SlotStore::new("entity"),
        }
    }

    /// Creates an entity, creating its `body` in `physics`.
    ///
    /// [`Body::entity`] is set to the new entity's id before the body is stored.
    pub fn create<H>(
        &mut self,
        physics: &mut PhysicsWorld<H>,
        mut body: Body<H>,
        animation: Option<AnimationId>,
        sprite_offset: impl Into<FreeVector>,
        data: D,
    ) -> EntityId {
        let id = EntityId::new(self.entities.next_index());
        body.entity = Some(id);
        let body = physics.create_body(body);
        let index = self.entities.create(Entity {
            body,
            animation,
            sprite_offset: sprite_offset.into(),
            data,
            active: true,
        });
        debug_assert_eq!(index, id.index());
        id
    }

    /// Returns the entity with the given id, active or not.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn get(&self, id: EntityId) -> &Entity<D> {
        &self.entities[id.index()]
    }

    /// Returns the entity with the given id for modification, active or not.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn get_mut(&mut self, id: EntityId) -> &mut Entity<D> {
        &mut self.entities[id.index()]
    }

    /// Returns the entity with the given id, or an error if it is out of range.
    pub fn try_get(&self, id: EntityId) -> Result<&Entity<D>, OutOfRange> {
        self.entities.get(id.index())
    }

    /// Number of entity slots, active or not. Valid [`EntityId`]s are less than this.
    pub fn count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates over active entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity<D>)> {
        self.entities
            .iter_active()
            .map(|(index, entity)| (EntityId::new(index), entity))
    }

    /// Deactivates the entity and its body.
    ///
    /// Its animation instance, if any, is left alone; see
    /// [`Scene::destroy_entity()`](crate::scene::Scene::destroy_entity) for a version
    /// that also destroys that.
    pub fn destroy<H>(
        &mut self,
        physics: &mut PhysicsWorld<H>,
        id: EntityId,
    ) -> Result<(), OutOfRange> {
        let entity = self.entities.get_mut(id.index())?;
        if entity.is_active() {
            entity.deactivate();
            physics.destroy_body(entity.body)?;
        }
        Ok(())
    }

    /// Finds the active entity whose body is `body`.
    pub fn find_by_body(&self, body: BodyId) -> Option<EntityId> {
        self.iter()
            .find(|(_, entity)| entity.body == body)
            .map(|(id, _)| id)
    }

    /// Removes all entities. Every previously returned id becomes invalid.
    ///
    /// This does not affect the bodies; reset the [`PhysicsWorld`] too.
    pub fn reset(&mut self) {
        self.entities.reset();
    }
}

impl<D> Default for Entities<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aab;
    use crate::physics::CollisionLayers;
    use euclid::{point2, vec2};

    struct NoHost;

    fn body(x: f64) -> Body<NoHost> {
        Body::new_minimal(
            Aab::new([x, 0.0], [4.0, 4.0]),
            CollisionLayers::layer(1),
            CollisionLayers::layer(2),
        )
    }

    #[test]
    fn create_links_body() {
        let mut physics = PhysicsWorld::default();
        let mut entities = Entities::new();
        let first = entities.create(&mut physics, body(0.0), None, [0.0, 6.0], "first");
        let second = entities.create(&mut physics, body(10.0), None, [0.0, 0.0], "second");

        assert_eq!(entities.count(), 2);
        let entity = entities.get(second);
        assert_eq!(entity.data, "second");
        assert_eq!(physics.body(entity.body).entity, Some(second));
        assert_eq!(entities.find_by_body(entity.body), Some(second));
        assert_eq!(
            entities.get(first).sprite_position(&physics),
            point2(0.0, 6.0)
        );
        assert_eq!(entities.get(first).sprite_offset, vec2(0.0, 6.0));
    }

    #[test]
    fn destroy_deactivates_body_and_reuses_slot() {
        let mut physics = PhysicsWorld::default();
        let mut entities = Entities::new();
        let a = entities.create(&mut physics, body(0.0), None, [0.0, 0.0], 1);
        let b = entities.create(&mut physics, body(10.0), None, [0.0, 0.0], 2);
        let a_body = entities.get(a).body;

        entities.destroy(&mut physics, a).unwrap();
        assert!(!entities.get(a).is_active());
        assert!(!physics.body(a_body).is_active());
        assert_eq!(entities.find_by_body(a_body), None);
        assert_eq!(entities.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![b]);

        let c = entities.create(&mut physics, body(20.0), None, [0.0, 0.0], 3);
        assert_eq!(c, a);
        assert_eq!(entities.get(c).data, 3);
        assert!(entities.get(c).is_active());
        assert_eq!(physics.body(entities.get(c).body).entity, Some(c));
        assert_eq!(physics.body(entities.get(c).body).position().x, 20.0);
    }

    #[test]
    fn try_get_and_reset() {
        let mut physics = PhysicsWorld::default();
        let mut entities = Entities::new();
        entities.create(&mut physics, body(0.0), None, [0.0, 0.0], ());
        assert!(entities.try_get(EntityId::new(0)).is_ok());
        assert!(entities.try_get(EntityId::new(1)).is_err());
        assert!(entities.destroy(&mut physics, EntityId::new(1)).is_err());

        entities.reset();
        physics.reset();
        assert_eq!(entities.count(), 0);
        assert_eq!(
            entities.create(&mut physics, body(0.0), None, [0.0, 0.0], ()),
            EntityId::new(0)
        );
    }

    #[test]
    #[should_panic = "entity index 4 is out of range (length 0)"]
    fn get_out_of_range() {
        let entities = Entities::<()>::new();
        let _ = entities.get(EntityId::new(4));
    }
}
