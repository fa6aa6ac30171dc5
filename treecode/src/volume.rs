use crate::{
    particle::{IntoPointMass, Particle, PointMass, VectorInternal},
    tree::{BoundingBox, NodeID, Octree},
    vector::{IntoVectorArray, Scalar, Vector},
};

/// Barnes-Hut force approximation between particles in 3D space.
///
/// The 3D equivalent of a [`Plane`](crate::plane::Plane), partitioning space
/// with an octree instead of a quadtree. Refer to [`Plane`](crate::plane::Plane)
/// for the semantics of the individual methods.
pub struct Volume<P: Particle>
where
    P::Vector: IntoVectorArray<[P::Scalar; 3]>,
{
    particles: Vec<P>,
    bounds: BoundingBox<[P::Scalar; 3]>,
    tree: Octree<VectorInternal<3, P>, P::Scalar>,
}

impl<P: Particle> Volume<P>
where
    P::Scalar: Scalar,
    P::Vector: IntoVectorArray<[P::Scalar; 3]>,
    VectorInternal<3, P>: Vector<Scalar = P::Scalar, Array = [P::Scalar; 3]>,
{
    /// Creates a new `Volume` from the given particles.
    pub fn new(particles: Vec<P>) -> Self {
        let points: Vec<PointMass<VectorInternal<3, P>, P::Scalar>> =
            particles.iter().map(|p| IntoPointMass::<3>::point_mass(p)).collect();
        let bounds = BoundingBox::containing(points.iter().map(|p| p.position.into()));

        Self {
            particles,
            bounds,
            tree: Octree::build(points, bounds),
        }
    }

    /// The particles of this `Volume`, in the order they were given to
    /// [`new`](Volume::new).
    #[inline]
    pub fn particles(&self) -> &[P] {
        &self.particles
    }

    /// The tightest bounding box of the particle positions, absent when the
    /// `Volume` holds no particles.
    #[inline]
    pub fn bounds(&self) -> Option<BoundingBox<[P::Scalar; 3]>> {
        (!self.particles.is_empty()).then_some(self.bounds)
    }

    /// The octree built over the particles.
    #[inline]
    pub fn tree(&self) -> &Octree<VectorInternal<3, P>, P::Scalar> {
        &self.tree
    }

    /// The id of the root node of the octree, absent when the `Volume` holds
    /// no particles.
    #[inline]
    pub fn root(&self) -> Option<NodeID> {
        self.tree.root()
    }

    /// Returns the force the other particles exert on the particle at the
    /// given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds of [`particles`](Volume::particles).
    #[inline]
    pub fn force_on<F>(&self, index: usize, theta: P::Scalar, mut kernel: F) -> P::Vector
    where
        F: FnMut(P::Scalar, P::Scalar, VectorInternal<3, P>) -> VectorInternal<3, P>,
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
    /// position and mass that is not part of the `Volume`.
    #[inline]
    pub fn force_at<F>(
        &self,
        position: P::Vector,
        mass: P::Scalar,
        theta: P::Scalar,
        mut kernel: F,
    ) -> P::Vector
    where
        F: FnMut(P::Scalar, P::Scalar, VectorInternal<3, P>) -> VectorInternal<3, P>,
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
        F: FnMut(P::Scalar, P::Scalar, VectorInternal<3, P>) -> VectorInternal<3, P>,
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
        F: Fn(P::Scalar, P::Scalar, VectorInternal<3, P>) -> VectorInternal<3, P> + Sync,
    {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};

        (0..self.particles.len())
            .into_par_iter()
            .map(|index| self.force_on(index, theta, &kernel))
            .collect()
    }
}
