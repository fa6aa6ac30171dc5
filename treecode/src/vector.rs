use std::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

/// Scalar types used for masses, distances and bounding box arithmetic.
pub trait Scalar:
    Sum
    + Send
    + Sync
    + Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + AddAssign
    + SubAssign
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Infinity (∞).
    const INFINITY: Self;

    /// Square root operation.
    fn sqrt(self) -> Self;

    /// Minimum between two scalars.
    fn min(self, rhs: Self) -> Self;

    /// Maximum between two scalars.
    fn max(self, rhs: Self) -> Self;

    /// Midpoint between two scalars.
    fn midpoint(self, rhs: Self) -> Self;
}

/// Vectors the engine uses for tree construction and force accumulation.
pub trait Vector:
    Sum
    + Send
    + Sync
    + Copy
    + Debug
    + Default
    + PartialEq
    + AddAssign
    + SubAssign
    + From<Self::Array>
    + Into<Self::Array>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Self::Scalar, Output = Self>
    + Div<Self::Scalar, Output = Self>
{
    /// The scalar type of the vector.
    type Scalar: Scalar;

    /// Array type this vector can be converted from and to.
    type Array;

    /// Norm squared, defined by the dot product on itself.
    fn length_squared(self) -> Self::Scalar;
}

/// Arbitrary vectors that can be converted from and into the
/// [`Array`](Vector::Array) of a [`Vector`].
///
/// Blanket implementations cover any type convertible from and into an array
/// of scalars of the right length, so positions expressed with other linear
/// algebra crates work without glue code.
pub trait IntoVectorArray<A> {
    /// Internal representation of the vector.
    type Vector;

    /// Converts the arbitrary vector into its internal representation.
    fn into_internal(self) -> Self::Vector;

    /// Converts the internal representation back into the arbitrary vector.
    fn from_internal(vector: Self::Vector) -> Self;
}

macro_rules! internal_vector {
    ($s: ty, $(($t: ty, $dim: literal)),*) => {
        impl Scalar for $s {
            const INFINITY: Self = <$s>::INFINITY;

            #[inline]
            fn sqrt(self) -> $s {
                self.sqrt()
            }

            #[inline]
            fn min(self, rhs: Self) -> $s {
                self.min(rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> $s {
                self.max(rhs)
            }

            #[inline]
            fn midpoint(self, rhs: Self) -> $s {
                (self + rhs) / 2.0
            }
        }
    $(
        impl Vector for $t {
            type Scalar = $s;

            type Array = [$s; $dim];

            #[inline]
            fn length_squared(self) -> $s {
                self.length_squared()
            }
        }

        impl<V> IntoVectorArray<[$s; $dim]> for V
        where
            V: Into<[$s; $dim]> + From<[$s; $dim]>,
        {
            type Vector = $t;

            #[inline]
            fn into_internal(self) -> Self::Vector {
                Self::Vector::from(self.into())
            }

            #[inline]
            fn from_internal(vector: Self::Vector) -> V {
                Self::from(vector.into())
            }
        }
    )*
    }
}

internal_vector!(f32, (glam::Vec2, 2), (glam::Vec3A, 3));
internal_vector!(f64, (glam::DVec2, 2), (glam::DVec3, 3));
