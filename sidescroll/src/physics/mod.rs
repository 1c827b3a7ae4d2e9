//! Continuously moving bodies and collision.

use crate::math::FreeCoordinate;

mod body;
pub use body::*;
mod collision;
pub use collision::*;
mod step;
pub use step::{PhysicsHost, PhysicsStepInfo, step};
mod world;
pub use world::*;


/// Bodies stopped by a static obstacle are left this far from its surface,
/// so that they are touching but not overlapping on the next step.
pub const POSITION_EPSILON: FreeCoordinate = 1e-6;

/// Velocities whose squared length is smaller than this are not integrated into
/// movement, to allow things to come to unchanging rest sooner.
const VELOCITY_EPSILON_SQUARED: FreeCoordinate = 1e-6 * 1e-6;

/// Velocities larger than this are clamped.
///
/// This provides an upper limit on the distance swept per body per step.
pub(crate) const VELOCITY_MAGNITUDE_LIMIT: FreeCoordinate = 1e6;
pub(crate) const VELOCITY_MAGNITUDE_LIMIT_SQUARED: FreeCoordinate =
    VELOCITY_MAGNITUDE_LIMIT * VELOCITY_MAGNITUDE_LIMIT;
