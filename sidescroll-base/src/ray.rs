use crate::math::{FreeCoordinate, FreePoint, FreeVector};

/// A ray; a half-infinite line segment (used as finite by the length of the
/// direction vector).
///
/// In collision tests, the ray's direction is the displacement of a moving point over
/// one step, so the segment from [`origin`](Self::origin) to
/// [`unit_endpoint()`](Self::unit_endpoint) is the path swept during that step.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The sole endpoint of the ray.
    pub origin: FreePoint,

    /// The direction in which the ray extends.
    ///
    /// The meaning, if any, of the magnitude of this vector depends on context;
    /// considered as a geometric object it is a parameter.
    pub direction: FreeVector,
}

impl Ray {
    /// Constructs a [`Ray`] from convertible types (e.g. tuples or 2-element arrays).
    /// Other than the use of [`Into`], this is equivalent to a struct literal.
    ///
    /// ```
    /// use sidescroll_base::euclid::{point2, vec2};
    /// use sidescroll_base::ray::Ray;
    ///
    /// assert_eq!(
    ///     Ray::new([1., 2.], [4., 5.]),
    ///     Ray {
    ///         origin: point2(1., 2.),
    ///         direction: vec2(4., 5.),
    ///     }
    /// );
    /// ```
    #[allow(clippy::missing_inline_in_public_items)] // is generic already
    pub fn new(origin: impl Into<FreePoint>, direction: impl Into<FreeVector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// Return `self.origin + self.direction`, the “far end” of the ray.
    ///
    /// This only makes sense in contexts which are specifically using the length of the
    /// direction vector as a distance, or for visualization as a line segment.
    #[must_use]
    #[inline]
    pub fn unit_endpoint(self) -> FreePoint {
        self.origin + self.direction
    }

    /// Returns the point at parameter `t` along the ray, where 0 is the origin and
    /// 1 is [`unit_endpoint()`](Self::unit_endpoint).
    #[must_use]
    #[inline]
    pub fn point_at(self, t: FreeCoordinate) -> FreePoint {
        self.origin + self.direction * t
    }

    /// Translate the ray's origin by the given offset, keeping its direction.
    #[must_use]
    #[inline]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self {
            origin: self.origin + offset,
            ..self
        }
    }
}
