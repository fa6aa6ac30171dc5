use crate::vector::{IntoVectorArray, Scalar};

/// Trait to describe a body of the simulation, consisting of a
/// [position](Particle::coord) and a [mass](Particle::mass).
///
/// #### Deriving:
///
/// Used in most cases, when the type has fields named `position` and `mass`:
/// ```
/// # use treecode::prelude::*;
/// # use glam::DVec2;
/// #
/// #[derive(Particle)]
/// struct Body {
///     position: DVec2,
///     mass: f64,
/// //  ...
/// }
/// ```
/// #### Manual implementation:
///
/// Used when the type cannot directly provide a position and a mass.
/// ```
/// # use treecode::prelude::*;
/// # use glam::DVec2;
/// #
/// struct Body {
///     x: f64,
///     y: f64,
///     density: f64,
///     volume: f64,
/// }
///
/// impl Particle for Body {
///     type Scalar = f64;
///     type Vector = DVec2;
///
///     fn coord(&self) -> DVec2 {
///         DVec2::new(self.x, self.y)
///     }
///
///     fn mass(&self) -> f64 {
///         self.density * self.volume
///     }
/// }
/// ```
///
/// If implementing the trait is not practical, tuples of a position and a
/// mass can be used instead:
/// ```
/// # use treecode::prelude::*;
/// # use glam::DVec2;
/// #
/// let particle = (DVec2::new(1.0, 1.0), 5.0);
///
/// assert_eq!(particle.coord(), DVec2::new(1.0, 1.0));
/// assert_eq!(particle.mass(), 5.0);
/// ```
pub trait Particle {
    /// Type of the [mass](Particle::mass) and of the elements composing the
    /// [position](Particle::coord) vector.
    type Scalar;

    /// Type of the [position](Particle::coord).
    type Vector;

    /// The position of the particle in space.
    fn coord(&self) -> Self::Vector;

    /// The mass of the particle.
    fn mass(&self) -> Self::Scalar;
}

impl<P: Particle> Particle for &P {
    type Scalar = P::Scalar;
    type Vector = P::Vector;

    #[inline]
    fn coord(&self) -> Self::Vector {
        (**self).coord()
    }

    #[inline]
    fn mass(&self) -> Self::Scalar {
        (**self).mass()
    }
}

impl<V: Clone, S: Clone> Particle for (V, S) {
    type Scalar = S;
    type Vector = V;

    #[inline]
    fn coord(&self) -> V {
        self.0.clone()
    }

    #[inline]
    fn mass(&self) -> S {
        self.1.clone()
    }
}

/// Point-mass representation of an object in space.
///
/// Tree nodes store their aggregate as a `PointMass`: the total mass of the
/// particles below the node placed at their center of mass.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointMass<V, S> {
    /// Position of the object.
    pub position: V,
    /// Mass of the object.
    pub mass: S,
}

impl<V, S> PointMass<V, S> {
    /// Creates a new [`PointMass`] with the given position and mass.
    #[inline]
    pub const fn new(position: V, mass: S) -> Self {
        Self { position, mass }
    }

    /// Returns true if the mass is zero.
    #[inline]
    pub fn is_massless(&self) -> bool
    where
        S: Default + PartialEq,
    {
        self.mass == S::default()
    }
}

type PVector<P> = <P as Particle>::Vector;
type PScalar<P> = <P as Particle>::Scalar;

/// The internal vector type associated with the
/// [position](Particle::coord) of a [`Particle`] in `DIM` dimensions.
pub type VectorInternal<const DIM: usize, P> =
    <PVector<P> as IntoVectorArray<[PScalar<P>; DIM]>>::Vector;

/// Conversion of a [`Particle`] to a [`PointMass`] of its internal vector.
pub(crate) trait IntoPointMass<const DIM: usize>: Particle
where
    Self::Scalar: Scalar,
    Self::Vector: IntoVectorArray<[Self::Scalar; DIM]>,
{
    #[inline]
    fn point_mass(&self) -> PointMass<VectorInternal<DIM, Self>, Self::Scalar> {
        PointMass::new(self.coord().into_internal(), self.mass())
    }
}

impl<const DIM: usize, P> IntoPointMass<DIM> for P
where
    P: Particle,
    P::Scalar: Scalar,
    P::Vector: IntoVectorArray<[P::Scalar; DIM]>,
{
}
