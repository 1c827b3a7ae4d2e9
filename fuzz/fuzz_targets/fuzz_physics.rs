#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sidescroll::euclid::Vector2D;
use sidescroll::math::{Aab, NotNan};
use sidescroll::physics::{self, Body, CollisionLayers, PhysicsConfig, PhysicsWorld, aab_overlap};
use sidescroll::time::Tick;

struct Host(PhysicsWorld<Host>);

impl physics::PhysicsHost for Host {
    fn physics(&self) -> &PhysicsWorld<Self> {
        &self.0
    }
    fn physics_mut(&mut self) -> &mut PhysicsWorld<Self> {
        &mut self.0
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    gravity: i8,
    position: [i16; 2],
    velocity: [i16; 2],
    half_size: [u8; 2],
    statics: Vec<([i16; 2], [u8; 2])>,
}

fn half(size: u8) -> f64 {
    f64::from(size) / 4.0 + 0.25
}

fuzz_target!(|input: Input| {
    let mut world = PhysicsWorld::new(PhysicsConfig::new(Vector2D::new(
        NotNan::from(0),
        NotNan::from(i32::from(input.gravity) * 10),
    )));
    for &(center, [hx, hy]) in input.statics.iter().take(16) {
        world.create_static_body(
            Aab::new(center.map(f64::from), [half(hx), half(hy)]),
            CollisionLayers::ALL,
        );
    }
    let body = world.create_body(
        Body::new_minimal(
            Aab::new(
                input.position.map(f64::from),
                input.half_size.map(half),
            ),
            CollisionLayers::ALL,
            CollisionLayers::ALL,
        )
        .with_velocity(input.velocity.map(f64::from)),
    );
    let overlapping = |world: &PhysicsWorld<Host>| {
        let aab = world.body(body).aab;
        world
            .static_bodies()
            .find(|(_, static_body)| aab_overlap(aab, static_body.aab))
            .map(|(_, static_body)| (aab, static_body.aab))
    };
    // Starting inside something is not interesting; push-out is a last resort.
    if overlapping(&world).is_some() {
        return;
    }
    let mut host = Host(world);

    for _ in 0..200 {
        let info = physics::step(&mut host, Tick::arbitrary());
        assert_eq!(info.push_outs, 0, "triggered push_out");
        if let Some((aab, static_aab)) = overlapping(&host.0) {
            panic!("{aab:?} overlaps {static_aab:?}");
        }
    }
});
