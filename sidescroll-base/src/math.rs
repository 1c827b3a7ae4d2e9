//! Mathematical utilities and decisions.

use euclid::{Point2D, Vector2D};
pub use ordered_float::{FloatIsNan, NotNan};

mod aab;
pub use aab::*;
mod axis;
pub use axis::*;
mod face;
pub use face::*;

/// Unit of measure for world-space coordinates: one pixel of the unscaled playfield.
///
/// +Y is up. Bodies standing on the floor are pushed out along +Y.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Px {}

/// Coordinates in world space.
pub type FreeCoordinate = f64;

/// Positions in world space.
pub type FreePoint = Point2D<FreeCoordinate, Px>;

/// Displacements, velocities, and accelerations in world space.
pub type FreeVector = Vector2D<FreeCoordinate, Px>;

/// Allows writing a [`NotNan`] value as a constant expression (which is not currently
/// a feature provided by the [`ordered_float`] crate itself).
///
/// Note that if the expression does not need to be constant, this macro may not be
/// needed; infallible construction can be written using `NotNan::from(an_integer)`.
///
/// # Examples
///
/// ```
/// use sidescroll_base::{notnan, math::NotNan};
///
/// const X: NotNan<f64> = notnan!(1.234);
/// ```
///
/// If anything other than a floating-point literal is used, the code will not compile:
///
/// ```compile_fail
/// # use sidescroll_base::{notnan, math::NotNan};
/// // Not a literal; will not compile
/// const X: NotNan<f64> = notnan!(f64::NAN);
/// ```
///
/// ```compile_fail
/// # use sidescroll_base::{notnan, math::NotNan};
/// // Not a float; will not compile
/// const X: NotNan<char> = notnan!('a');
/// ```
#[macro_export]
macro_rules! notnan {
    ($value:literal) => {
        match $value {
            value => {
                // Safety: Only literal values are allowed, which will either be a non-NaN
                // float or (as checked below) a type mismatch.
                let result = unsafe { $crate::math::NotNan::new_unchecked(value) };

                // Require type unification with a float literal. This prohibits char, &str, etc.
                let _ = if false {
                    // Safety: Statically never NaN, and is also never executed.
                    unsafe { $crate::math::NotNan::new_unchecked(0.0) }
                } else {
                    result
                };

                result
            }
        }
    };
}

/// Returns whether both components of the vector are finite (neither infinite nor NaN).
#[inline]
pub fn vector_is_finite(vector: FreeVector) -> bool {
    vector.x.is_finite() && vector.y.is_finite()
}

/// Converts a vector of [`NotNan`] components to a plain float vector.
#[inline]
pub fn vector_into_inner(vector: Vector2D<NotNan<FreeCoordinate>, Px>) -> FreeVector {
    Vector2D::new(vector.x.into_inner(), vector.y.into_inner())
}
