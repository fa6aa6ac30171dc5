use crate::{
    particle::{IntoPointMass, Particle, PointMass, VectorInternal},
    tree::{BoundingBox, NodeID, Quadtree},
    vector::{IntoVectorArray, Scalar, Vector},
};

/// Barnes-Hut force approximation between particles in 2D space.
///
/// A `Plane` owns its particles and a quadtree built over them once at
/// construction. The tree is not updated when particles move; build a new
/// `Plane` instead. Queries are read-only and can run concurrently.
///
/// # Example
///
/// ```
/// # use treecode::prelude::*;
/// # use glam::DVec2;
/// let plane = Plane::new(vec![
///     (DVec2::new(0.0, 1.0), 1.0),
///     (DVec2::new(0.0, -1.0), 1.0),
/// ]);
///
/// let force = plane.force_on(0, 0.5, kernel::gravity);
///
/// assert_eq!(force, DVec2::new(0.0, -0.25));
/// ```
pub struct Plane<P: Particle>
where
    P::Vector: IntoVectorArray<[P::Scalar; 2]>,
{
    particles: Vec<P>,
    bounds: BoundingBox<[P::Scalar; 2]>,
    tree: Quadtree<VectorInternal<2, P>, P::Scalar>,
}

impl<P: Particle> Plane<P>
where
    P::Scalar: Scalar,
    P::Vector: IntoVectorArray<[P::Scalar; 2]>,
    VectorInternal<2, P>: Vector<Scalar = P::Scalar, Array = [P::Scalar; 2]>,
{
    /// Creates a new `Plane` from the given particles.
    ///
    /// The particle order is preserved; [`force_on`](Plane::force_on) refers
    /// to particles by their index in it. The tree spans the tightest
    /// bounding box of the particle positions. An empty input is valid and
    /// produces a `Plane` whose queries return a zero vector.
    pub fn new(particles: Vec<P>) -> Self {
        let points: Vec<PointMass<VectorInternal<2, P>, P::Scalar>> =
            particles.iter().map(|p| IntoPointMass::<2>::point_mass(p)).collect();
        let bounds = BoundingBox::containing(points.iter().map(|p| p.position.into()));

        Self {
            particles,
            bounds,
            tree: Quadtree::build(points, bounds),
        }
    }

    /// The particles of this `Plane`, in the order they were given to
    /// [`new`](Plane::new).
    #[inline]
    pub fn particles(&self) -> &[P] {
        &self.particles
    }

    /// The tightest bounding box of the particle positions, absent when the
    /// `Plane` holds no particles.
    #[inline]
    pub fn bounds(&self) -> Option<BoundingBox<[P::Scalar; 2]>> {
        (!self.particles.is_empty()).then_some(self.bounds)
    }

    /// The quadtree built over the particles.
    #[inline]
    pub fn tree(&self) -> &Quadtree<VectorInternal<2, P>, P::Scalar> {
        &self.tree
    }

    /// The id of the root node of the quadtree, absent when the `Plane`
    /// holds no particles.
    #[inline]
    pub fn root(&self) -> Option<NodeID> {
        self.tree.root()
    }

    /// Returns the force the other particles exert on the particle at the
    /// given index.
    ///
    /// The opening parameter `theta` trades accuracy for speed: with
    /// `theta = 0` every pair is evaluated exactly, larger values aggregate
    /// more of the tree. `theta` must be non-negative. The probe itself is
    /// excluded from the sum by index, so a particle sharing its position
    /// with another still interacts with it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds of [`particles`](Plane::particles).
    #[inline]
    pub fn force_on<F>(&self, index: usize, theta: P::Scalar, mut kernel: F) -> P::Vector
    where
        F: FnMut(P::Scalar, P::Scalar, VectorInternal<2, P>) -> VectorInternal<2, P>,
    {
        let probe = self.tree.points[index];

        <P::Vector>::from_internal(self.tree.force_at(
            self.tree.root(),
            probe,
            Some(index as u32),
            theta,
            &mut kernel,
        ))
    }

    /// Returns the force the particles exert on a probe of the given
    /// position and mass that is not part of the `Plane`.
    ///
    /// No particle is excluded from the sum.
    #[inline]
    pub fn force_at<F>(
        &self,
        position: P::Vector,
        mass: P::Scalar,
        theta: P::Scalar,
        mut kernel: F,
    ) -> P::Vector
    where
        F: FnMut(P::Scalar, P::Scalar, VectorInternal<2, P>) -> VectorInternal<2, P>,
    {
        let probe = PointMass::new(position.into_internal(), mass);

        <P::Vector>::from_internal(
            self.tree
                .force_at(self.tree.root(), probe, None, theta, &mut kernel),
        )
    }

    /// Returns the force exerted on every particle, in particle order.
    #[inline]
    pub fn forces<F>(&self, theta: P::Scalar, mut kernel: F) -> Vec<P::Vector>
    where
        F: FnMut(P::Scalar, P::Scalar, VectorInternal<2, P>) -> VectorInternal<2, P>,
    {
        (0..self.particles.len())
            .map(|index| self.force_on(index, theta, &mut kernel))
            .collect()
    }

    /// Returns the force exerted on every particle, computed on multiple
    /// threads with [rayon](https://github.com/rayon-rs/rayon).
    #[cfg(feature = "parallel")]
    #[inline]
    pub fn par_forces<F>(&self, theta: P::Scalar, kernel: F) -> Vec<P::Vector>
    where
        P: Sync,
        P::Vector: Send,
        F: Fn(P::Scalar, P::Scalar, VectorInternal<2, P>) -> VectorInternal<2, P> + Sync,
    {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};

        (0..self.particles.len())
            .into_par_iter()
            .map(|index| self.force_on(index, theta, &kernel))
            .collect()
    }
}
