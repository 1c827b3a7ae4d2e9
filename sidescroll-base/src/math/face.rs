//! Axis-aligned unit vectors: the [`Face4`] type.
//! This module is private but reexported by its parent.

use crate::math::{Axis, FreeVector};

/// Identifies a side of a box, or an axis-aligned unit vector in the plane.
///
/// Contact normals produced by collision are always one of these four directions.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Face4 {
    /// Negative X; the face whose normal vector is `(-1, 0)`; leftward.
    NX = 1,
    /// Negative Y; the face whose normal vector is `(0, -1)`; downward.
    NY = 2,
    /// Positive X; the face whose normal vector is `(1, 0)`; rightward.
    PX = 3,
    /// Positive Y; the face whose normal vector is `(0, 1)`; upward.
    PY = 4,
}

impl Face4 {
    /// All the values of [`Face4`].
    pub const ALL: [Face4; 4] = [Face4::NX, Face4::NY, Face4::PX, Face4::PY];

    /// Returns the [`Face4`] whose normal vector is exactly the given vector,
    /// or [`None`] if the vector is not an axis-aligned unit vector.
    ///
    /// ```
    /// use sidescroll_base::math::{Face4, FreeVector};
    ///
    /// assert_eq!(Face4::from_unit_vector(FreeVector::new(0., 1.)), Some(Face4::PY));
    /// assert_eq!(Face4::from_unit_vector(FreeVector::new(0., 0.)), None);
    /// assert_eq!(Face4::from_unit_vector(FreeVector::new(1., 1.)), None);
    /// ```
    #[allow(clippy::missing_inline_in_public_items, reason = "unsure")]
    pub fn from_unit_vector(vector: FreeVector) -> Option<Self> {
        match (vector.x, vector.y) {
            (-1.0, 0.0) => Some(Face4::NX),
            (1.0, 0.0) => Some(Face4::PX),
            (0.0, -1.0) => Some(Face4::NY),
            (0.0, 1.0) => Some(Face4::PY),
            _ => None,
        }
    }

    /// Returns which axis this face's normal vector is parallel to.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::NX | Self::PX => Axis::X,
            Self::NY | Self::PY => Axis::Y,
        }
    }

    /// Returns the axis-aligned unit vector normal to this face.
    #[inline]
    #[must_use]
    pub fn normal_vector(self) -> FreeVector {
        match self {
            Face4::NX => FreeVector::new(-1.0, 0.0),
            Face4::NY => FreeVector::new(0.0, -1.0),
            Face4::PX => FreeVector::new(1.0, 0.0),
            Face4::PY => FreeVector::new(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhaust::Exhaust;
    use pretty_assertions::assert_eq;

    #[test]
    fn unit_vector_roundtrip() {
        for face in Face4::ALL {
            assert_eq!(Face4::from_unit_vector(face.normal_vector()), Some(face));
            assert_eq!(face.normal_vector()[face.axis()].abs(), 1.0, "{face:?}");
        }
    }

    #[test]
    fn exhaust_matches_all() {
        assert_eq!(Face4::exhaust().collect::<Vec<_>>(), Face4::ALL.to_vec());
    }

    #[test]
    fn from_unit_vector_rejects_non_unit() {
        for vector in [
            FreeVector::new(0.5, 0.0),
            FreeVector::new(-1.0, -1.0),
            FreeVector::new(f64::NAN, 0.0),
        ] {
            assert_eq!(Face4::from_unit_vector(vector), None, "{vector:?}");
        }
    }
}
