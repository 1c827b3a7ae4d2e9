/// Enumeration of the axes of two-dimensional space.
///
/// Can be used to infallibly index 2-component arrays and vectors.
///
/// See also:
///
/// * [`Face4`](crate::math::Face4) specifies an axis and a direction on the axis.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Axis {
    X = 0,
    Y = 1,
}

impl Axis {
    /// Both axes in the standard order, [X, Y].
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// Convert the axis to a number for indexing 2-element arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

mod impl_index_axis {
    use super::Axis;
    use core::ops;

    impl<T> ops::Index<Axis> for [T; 2] {
        type Output = T;

        #[inline]
        fn index(&self, index: Axis) -> &Self::Output {
            &self[index as usize]
        }
    }
    impl<T> ops::IndexMut<Axis> for [T; 2] {
        #[inline]
        fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
            &mut self[index as usize]
        }
    }

    macro_rules! impl_xy_e {
        ($x:ident $y:ident, $($type:tt)*) => {
            impl<T, U> ops::Index<Axis> for $($type)*<T, U> {
                type Output = T;

                #[inline]
                fn index(&self, index: Axis) -> &Self::Output {
                    match index {
                        Axis::X => &self.$x,
                        Axis::Y => &self.$y,
                    }
                }
            }
            impl<T, U> ops::IndexMut<Axis> for $($type)*<T, U> {
                #[inline]
                fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
                    match index {
                        Axis::X => &mut self.$x,
                        Axis::Y => &mut self.$y,
                    }
                }
            }
        };
    }
    impl_xy_e!(x y, euclid::Vector2D);
    impl_xy_e!(x y, euclid::Point2D);
}
