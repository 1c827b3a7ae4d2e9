//! Sidescroll is the simulation core of a real-time 2D platformer: a fixed-step physics
//! and collision engine operating over pools of axis-aligned bodies, plus the
//! slot-reuse storage shared by every game-object pool.
//!
//! Rendering, audio, input, and the frame clock are left to the application; this crate
//! only consumes a [`Tick`](time::Tick) per step and exposes state for them to read.
//!
//! ## Data model
//!
//! * [`SlotStore`](arena::SlotStore) is a dense, index-addressed pool whose records
//!   carry their own “active” flag. Destroying a record only deactivates it; the next
//!   creation reuses the lowest inactive index. Every other pool is one of these.
//! * [`PhysicsWorld`](physics::PhysicsWorld) owns the dynamic [`Body`](physics::Body)
//!   and [`StaticBody`](physics::StaticBody) pools and advances them with
//!   [`physics::step()`]. Bodies collide against static geometry with a swept
//!   (continuous) test, and against each other by overlap only.
//!   Hit callbacks are stored per body and are invoked synchronously with the whole
//!   host context, so they may modify or create any object.
//! * [`Entities`](entity::Entities) associate a body, an optional animation, and
//!   game-defined data.
//! * [`Animations`](animation::Animations) hold sprite-sheet frame sequences and
//!   their running instances.
//! * [`Scene`](scene::Scene) bundles all of the above into one explicitly constructed
//!   context object; there is no global state.
//!
//! ## Coordinate system
//!
//! World space is measured in [`Px`](math::Px) with +Y pointing up. A body resting on
//! a floor has received a contact normal of `(0, 1)`.
//!
//! ## Crate features
//!
//! * `serde`: Enable [`serde`] serialization of configuration such as
//!   [`PhysicsConfig`](physics::PhysicsConfig).
//!
//! ## Dependencies and global state
//!
//! `sidescroll` has no global state. However, it does write log messages using the
//! [`log`] crate and is therefore subject to that global configuration.
//! At [`log::Level::Debug`] and above, nothing is logged every frame unless something
//! is wrong.
//!
//! `sidescroll` depends on and re-exports the following crates as part of its public
//! API:
//!
//! * [`euclid`] for vector math (as `sidescroll::euclid`).
//! * [`ordered_float`] (as `sidescroll::math::NotNan`).

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(test, allow(clippy::shadow_unrelated))]

pub mod animation;
pub mod arena;
pub mod entity;
pub mod physics;
pub mod scene;

/// Mathematical utilities and decisions.
pub mod math {
    pub use sidescroll_base::math::*;
    #[doc(inline)]
    pub use sidescroll_base::notnan;
}

/// Line segments used for swept collision tests.
pub mod ray {
    pub use sidescroll_base::ray::*;
}

/// Data types for simulated time.
pub mod time {
    pub use sidescroll_base::time::*;
}

/// Tools that we could imagine being in the Rust standard library, but aren't.
pub mod util {
    pub use sidescroll_base::util::*;
}

pub use euclid;
