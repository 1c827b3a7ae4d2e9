//! Whole-scene scenarios resembling actual gameplay: enemies patrolling between walls,
//! a kill zone which respawns what falls into it, and reproducibility of the result.

use rand::{Rng as _, SeedableRng as _};

use sidescroll::arena::Slot as _;
use sidescroll::entity::EntityId;
use sidescroll::euclid::Vector2D;
use sidescroll::math::{Aab, NotNan, notnan};
use sidescroll::physics::{Body, BodyId, CollisionLayers, PhysicsConfig};
use sidescroll::scene::Scene;
use sidescroll::time::Tick;

const PLAYER: CollisionLayers = CollisionLayers::layer(0);
const ENEMY: CollisionLayers = CollisionLayers::layer(1);
const TERRAIN: CollisionLayers = CollisionLayers::layer(2);

const ENEMY_SPEED: f64 = 80.0;
const ENRAGED_SPEED: f64 = ENEMY_SPEED * 1.5;

#[derive(Clone, Debug, Default)]
struct Data {
    enraged: bool,
    grounded: bool,
    bounces: u32,
    hits: u32,
}

type Game = Scene<Data>;

fn tick() -> Tick {
    Tick::per_second(std::num::NonZeroU32::new(60).unwrap())
}

fn new_game() -> Game {
    Scene::new(PhysicsConfig::new(Vector2D::new(
        NotNan::from(0),
        notnan!(-900.0),
    )))
}

fn entity_of(game: &Game, body: BodyId) -> EntityId {
    game.physics.body(body).entity.unwrap()
}

/// Floor surface at y = 0 and wall surfaces at x = ±100.
fn build_walls(game: &mut Game) {
    game.physics
        .create_static_body(Aab::new([-110.0, 50.0], [10.0, 60.0]), TERRAIN);
    game.physics
        .create_static_body(Aab::new([110.0, 50.0], [10.0, 60.0]), TERRAIN);
}

fn spawn_enemy(game: &mut Game, position: [f64; 2], direction: f64, enraged: bool) -> EntityId {
    let speed = if enraged { ENRAGED_SPEED } else { ENEMY_SPEED };
    game.create_entity(
        Body::new_minimal(Aab::new(position, [5.0, 5.0]), ENEMY, PLAYER | TERRAIN)
            .with_velocity([speed * direction, 0.0])
            .with_on_hit_static(|game: &mut Game, this, _, hit| {
                // Turn around at walls.
                if hit.normal.x != 0.0 {
                    let entity = entity_of(game, this);
                    let data = &mut game.entity_mut(entity).data;
                    data.bounces += 1;
                    let speed = if data.enraged { ENRAGED_SPEED } else { ENEMY_SPEED };
                    game.physics.body_mut(this).velocity.x = speed * hit.normal.x;
                }
            }),
        None,
        [0.0, 5.0],
        Data {
            enraged,
            ..Data::default()
        },
    )
}

fn spawn_player(game: &mut Game, position: [f64; 2]) -> EntityId {
    game.create_entity(
        Body::new_minimal(Aab::new(position, [5.0, 5.0]), PLAYER, ENEMY | TERRAIN)
            .with_on_hit(|game: &mut Game, this, _, _| {
                let entity = entity_of(game, this);
                game.entity_mut(entity).data.hits += 1;
            })
            .with_on_hit_static(|game: &mut Game, this, _, hit| {
                if hit.normal.y > 0.0 {
                    let entity = entity_of(game, this);
                    game.entity_mut(entity).data.grounded = true;
                }
            }),
        None,
        [0.0, 0.0],
        Data::default(),
    )
}

#[test]
fn enemy_patrols_between_walls() {
    let mut game = new_game();
    game.physics
        .create_static_body(Aab::new([0.0, -10.0], [200.0, 10.0]), TERRAIN);
    build_walls(&mut game);
    let enemy = spawn_enemy(&mut game, [0.0, 5.5], 1.0, false);
    let player = spawn_player(&mut game, [50.0, 30.0]);

    for _ in 0..600 {
        game.step(tick());

        let body = game.physics.body(game.entity(enemy).body);
        let position = body.position();
        assert!(position.x.abs() <= 95.0 + 1e-3, "{body:?}");
        assert!(position.y >= 5.0, "{body:?}");
        assert_eq!(body.velocity.x.abs(), ENEMY_SPEED, "{body:?}");
    }

    assert!(game.entity(enemy).data.bounces >= 3);
    let player_data = &game.entity(player).data;
    assert!(player_data.grounded);
    assert!(player_data.hits >= 1, "enemy should have passed the player");
    // Overlaps are reported but do not push either body.
    let player_body = game.physics.body(game.entity(player).body);
    assert_eq!(player_body.position().x, 50.0);
}

#[test]
fn kill_zone_respawns_enraged_enemy() {
    let mut game = new_game();
    // Two floor pieces with a gap from x = -20 to 20.
    game.physics
        .create_static_body(Aab::new([-60.0, -10.0], [40.0, 10.0]), TERRAIN);
    game.physics
        .create_static_body(Aab::new([60.0, -10.0], [40.0, 10.0]), TERRAIN);
    build_walls(&mut game);
    game.physics.create_trigger(
        Aab::new([0.0, -60.0], [30.0, 10.0]),
        CollisionLayers::empty(),
        ENEMY | PLAYER,
        |game: &mut Game, _, other, _| {
            if game.physics.body(other).layer != ENEMY {
                return;
            }
            let Some(entity) = game.entities.find_by_body(other) else {
                return;
            };
            game.destroy_entity(entity).unwrap();
            spawn_enemy(game, [-60.0, 50.0], -1.0, true);
        },
    );
    let first = spawn_enemy(&mut game, [0.0, 50.0], 0.0, false);
    let first_body = game.entity(first).body;

    for _ in 0..60 {
        game.step(tick());
    }

    // The respawned enemy reused the dead one's slots.
    assert_eq!(game.entities.count(), 1);
    assert_eq!(game.physics.body_count(), 2);
    let respawned = game.entity(first);
    assert!(respawned.is_active());
    assert_eq!(respawned.body, first_body);
    assert!(respawned.data.enraged);
    assert!(respawned.data.bounces >= 1);

    let body = game.physics.body(respawned.body);
    assert_eq!(body.velocity.x, ENRAGED_SPEED);
    assert!(body.position().x < -20.0);
    assert!((body.position().y - 5.0).abs() < 1e-3, "{body:?}");
}

#[test]
fn falling_onto_floor_end_to_end() {
    let mut game = new_game();
    game.physics.set_config(PhysicsConfig::default());
    game.physics
        .create_static_body(Aab::new([0.0, 0.0], [50.0, 10.0]), TERRAIN);
    let player = spawn_player(&mut game, [0.0, 50.0]);
    let body = game.entity(player).body;
    game.physics.body_mut(body).velocity = Vector2D::new(0.0, -500.0);

    let info = game.step(Tick::from_seconds(0.2));

    let body = game.physics.body(body);
    // The body stops a small epsilon above the floor surface, not exactly on it.
    assert!((body.position().y - 15.0).abs() < 1e-5);
    assert_eq!(body.velocity.y, 0.0);
    assert_eq!(info.static_contacts, 1);
    assert!(game.entity(player).data.grounded);
}

#[test]
fn slot_reuse_does_not_leak_state() {
    let mut game = new_game();
    let enemy = spawn_enemy(&mut game, [0.0, 0.0], 1.0, true);
    game.entity_mut(enemy).data.bounces = 7;
    let old_body = game.entity(enemy).body;
    game.destroy_entity(enemy).unwrap();

    let player = spawn_player(&mut game, [30.0, 40.0]);

    assert_eq!(player, enemy);
    let entity = game.entity(player);
    assert_eq!(entity.body, old_body);
    assert_eq!(entity.data.bounces, 0);
    assert!(!entity.data.enraged);
    assert_eq!(entity.animation, None);
    let body = game.physics.body(entity.body);
    assert_eq!(body.layer, PLAYER);
    assert_eq!(body.velocity, Vector2D::zero());
    assert_eq!(body.entity, Some(player));
    assert!(body.on_hit.is_some());
}

/// Runs a randomized crowd of enemies and records every body's state after each step.
fn run_crowd(seed: u64) -> Vec<[u64; 4]> {
    let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(seed);
    let mut game = new_game();
    game.physics
        .create_static_body(Aab::new([0.0, -10.0], [200.0, 10.0]), TERRAIN);
    build_walls(&mut game);
    for _ in 0..20 {
        let position = [rng.random_range(-90.0..90.0), rng.random_range(5.0..80.0)];
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        spawn_enemy(&mut game, position, direction, rng.random_bool(0.2));
    }
    spawn_player(&mut game, [0.0, 30.0]);

    let mut trajectory = Vec::new();
    for _ in 0..120 {
        game.step(tick());
        trajectory.extend(game.physics.bodies().map(|(_, body)| {
            let position = body.position();
            [
                position.x.to_bits(),
                position.y.to_bits(),
                body.velocity.x.to_bits(),
                body.velocity.y.to_bits(),
            ]
        }));
    }
    trajectory
}

#[test]
fn identical_inputs_give_identical_trajectories() {
    let first = run_crowd(1234);
    assert_eq!(first.len(), 21 * 120);
    assert!(first == run_crowd(1234));
    assert!(first != run_crowd(99));
}
