#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use sidescroll::euclid::Vector2D;
use sidescroll::math::{Aab, NotNan, notnan};
use sidescroll::physics::{
    Body, CollisionLayers, PhysicsConfig, minkowski_difference, ray_vs_aab,
};
use sidescroll::ray::Ray;
use sidescroll::scene::Scene;
use sidescroll::time::Tick;

const PLAYER: CollisionLayers = CollisionLayers::layer(0);
const ENEMY: CollisionLayers = CollisionLayers::layer(1);
const TERRAIN: CollisionLayers = CollisionLayers::layer(2);

/// A level with a floor, two walls, and a few platforms, and `count` enemies walking
/// around in it.
fn populated_scene(count: usize) -> Scene<()> {
    let mut scene = Scene::new(PhysicsConfig::new(Vector2D::new(
        NotNan::from(0),
        notnan!(-900.0),
    )));
    let physics = &mut scene.physics;
    physics.create_static_body(Aab::new([320.0, 16.0], [320.0, 16.0]), TERRAIN);
    physics.create_static_body(Aab::new([16.0, 180.0], [16.0, 180.0]), TERRAIN);
    physics.create_static_body(Aab::new([624.0, 180.0], [16.0, 180.0]), TERRAIN);
    for i in 0..4 {
        let x = 96.0 + 128.0 * f64::from(i);
        physics.create_static_body(Aab::new([x, 140.0], [48.0, 8.0]), TERRAIN);
    }

    for i in 0..count {
        let x = 40.0 + (i % 50) as f64 * 11.0;
        let y = 60.0 + (i / 50) as f64 * 30.0;
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        scene.create_entity(
            Body::new_minimal(Aab::new([x, y], [5.0, 5.0]), ENEMY, PLAYER | TERRAIN)
                .with_velocity([80.0 * direction, 0.0])
                .with_on_hit_static(|scene: &mut Scene<()>, this, _, hit| {
                    if hit.normal.x != 0.0 {
                        scene.physics.body_mut(this).velocity.x = 80.0 * hit.normal.x;
                    }
                }),
            None,
            [0.0, 5.0],
            (),
        );
    }
    scene
}

pub fn physics_bench(c: &mut Criterion) {
    c.bench_function("ray_vs_aab: hit", |b| {
        let target = minkowski_difference(
            Aab::new([0.0, 0.0], [50.0, 10.0]),
            Aab::new([0.0, 50.0], [5.0, 5.0]),
        );
        b.iter(|| ray_vs_aab(black_box(Ray::new([0.0, 0.0], [3.0, -100.0])), target))
    });

    c.bench_function("ray_vs_aab: miss", |b| {
        let target = Aab::new([0.0, 0.0], [1.0, 1.0]);
        b.iter(|| ray_vs_aab(black_box(Ray::new([5.0, 5.0], [1.0, 3.0])), target))
    });

    for count in [10, 100, 1000] {
        c.bench_function(&format!("step: {count} bodies"), |b| {
            b.iter_batched_ref(
                || populated_scene(count),
                |scene| scene.step(Tick::arbitrary()),
                BatchSize::SmallInput,
            )
        });
    }

    c.bench_function("step: 100 bodies, 60 steps", |b| {
        b.iter_batched_ref(
            || populated_scene(100),
            |scene| {
                for _ in 0..60 {
                    scene.step(Tick::arbitrary());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, physics_bench);
criterion_main!(benches);
