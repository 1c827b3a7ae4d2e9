//! This library is an internal component of [`sidescroll`],
//! which defines the geometry and time types that the simulation is built from.
//! It holds no simulation state of its own.
//!
//! [`sidescroll`]: ../sidescroll/index.html

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(clippy::missing_inline_in_public_items)]

/// Points, vectors, axes, faces, and axis-aligned boxes.
pub mod math;

/// Line segments used for swept collision tests.
pub mod ray;

/// The fixed time step supplied to each simulation step.
pub mod time;

/// Tools that we could imagine being in the Rust standard library, but aren't.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
