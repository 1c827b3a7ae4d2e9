use core::fmt;

use manyfmt::Refmt as _;

use crate::math::{Axis, FreePoint, FreeVector};
use crate::util::ConciseDebug;

/// Axis-Aligned Box data type, stored as a center point and a half-extent.
///
/// The half-extent is never negative, infinite, or NaN; [`Aab::try_new()`] enforces this.
///
/// Containment and intersection treat the box as an **open** region: points on the
/// boundary are outside, and boxes which only share an edge do not intersect.
#[derive(Copy, Clone, PartialEq)]
pub struct Aab {
    center: FreePoint,
    half_size: FreeVector,
}

/// Error when an [`Aab`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum InvalidAab {
    /// AAB half-extent {0:?} is negative, infinite, or NaN
    HalfSize(FreeVector),
    /// AAB center {0:?} is infinite or NaN
    Center(FreePoint),
}

impl core::error::Error for InvalidAab {}

impl Aab {
    /// Constructs an [`Aab`] from its center point and half-extent.
    ///
    /// Panics if the half-extent is negative, infinite, or NaN, or if the center is not
    /// finite.
    ///
    /// ```
    /// use sidescroll_base::math::{Aab, FreePoint};
    ///
    /// let aab = Aab::new([0.0, 50.0], [5.0, 5.0]);
    /// assert_eq!(aab.min(), FreePoint::new(-5.0, 45.0));
    /// assert_eq!(aab.max(), FreePoint::new(5.0, 55.0));
    /// ```
    #[inline]
    #[track_caller]
    pub fn new(center: impl Into<FreePoint>, half_size: impl Into<FreeVector>) -> Self {
        match Self::try_new(center.into(), half_size.into()) {
            Ok(aab) => aab,
            Err(error) => panic!("{error}"),
        }
    }

    /// Constructs an [`Aab`] from its center point and half-extent, or returns an error
    /// if either is invalid.
    #[inline]
    pub fn try_new(center: FreePoint, half_size: FreeVector) -> Result<Self, InvalidAab> {
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(InvalidAab::Center(center));
        }
        for axis in Axis::ALL {
            let h = half_size[axis];
            // Written to also reject NaN.
            if !(h >= 0.0 && h.is_finite()) {
                return Err(InvalidAab::HalfSize(half_size));
            }
        }
        Ok(Self { center, half_size })
    }

    /// The center of the box.
    #[inline]
    pub const fn center(&self) -> FreePoint {
        self.center
    }

    /// The distance from the center to each edge of the box, per axis.
    #[inline]
    pub const fn half_size(&self) -> FreeVector {
        self.half_size
    }

    /// The most negative corner of the box.
    #[inline]
    pub fn min(&self) -> FreePoint {
        self.center - self.half_size
    }

    /// The most positive corner of the box.
    #[inline]
    pub fn max(&self) -> FreePoint {
        self.center + self.half_size
    }

    /// Returns whether the point lies strictly inside the box on both axes.
    ///
    /// ```
    /// use sidescroll_base::math::{Aab, FreePoint};
    ///
    /// let aab = Aab::new([0.0, 0.0], [1.0, 1.0]);
    /// assert!(aab.contains(FreePoint::new(0.5, -0.5)));
    /// assert!(!aab.contains(FreePoint::new(1.0, 0.0))); // on the boundary
    /// ```
    #[inline]
    pub fn contains(&self, point: FreePoint) -> bool {
        for axis in Axis::ALL {
            if !((point[axis] - self.center[axis]).abs() < self.half_size[axis]) {
                return false;
            }
        }
        true
    }

    /// Returns whether the interiors of the two boxes intersect.
    ///
    /// Boxes that only touch along an edge or at a corner do not intersect.
    #[inline]
    pub fn intersects(&self, other: Aab) -> bool {
        for axis in Axis::ALL {
            let distance = (self.center[axis] - other.center[axis]).abs();
            if !(distance < self.half_size[axis] + other.half_size[axis]) {
                return false;
            }
        }
        true
    }

    /// Translate this box by the specified offset.
    ///
    /// Panics if the result would not be finite.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self::new(self.center + offset, self.half_size)
    }

    /// Returns a copy of this box with the center moved to `center`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn with_center(self, center: FreePoint) -> Self {
        Self::new(center, self.half_size)
    }
}

impl fmt::Debug for Aab {
    #[mutants::skip]
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab { center, half_size } = *self;
        f.debug_struct("Aab")
            .field("center", &center.refmt(&ConciseDebug))
            .field("half_size", &half_size.refmt(&ConciseDebug))
            .finish()
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}
