//! Mass-weighted spatial trees and the Barnes-Hut traversal.
//!
//! The tree is an arena: nodes live in a flat vector and reference each other
//! by index, the aggregate (total mass and center of mass) of every node
//! lives in a second vector parallel to the first. Building allocates the
//! arena in one go and dropping the tree releases it in one go.

/// Bounding box types and operations used to partition space.
pub mod bbox;

pub use bbox::*;

use crate::{
    particle::PointMass,
    vector::{Scalar, Vector},
};

/// Index of a [`Node`] in an [`Orthtree`].
pub type NodeID = u32;

/// Subdivision stops below this depth; a region that still holds multiple
/// distinct positions becomes one external node. Distinct f64 coordinates
/// separate long before this in practice.
const MAX_DEPTH: u32 = 64;

/// The children of an internal node and the region they partition.
#[derive(Clone, Copy, Debug)]
pub struct SizedOrthant<const X: usize, B> {
    /// Child node of each region, absent when that region holds no particle.
    pub orthant: [Option<NodeID>; X],
    /// Bounding box enclosing the particles below this node.
    pub bbox: B,
}

/// Node of an [`Orthtree`].
#[derive(Clone, Copy, Debug)]
pub enum Node<const X: usize, B> {
    /// Node with child nodes.
    Internal(SizedOrthant<X, B>),
    /// Node without children, holding one particle or several coincident
    /// ones.
    External {
        /// Offset of the first member in [`Orthtree::members`].
        first: u32,
        /// Number of members.
        count: u32,
    },
}

/// N-dimensional generalisation of mass-weighted quadtrees and octrees,
/// subdividing space in `X = 2^D` regions.
///
/// Once built the tree is immutable; inserting or moving a particle means
/// building a new tree. Force queries only read it and can run concurrently.
#[derive(Clone, Debug)]
pub struct Orthtree<const X: usize, const D: usize, T, S> {
    /// Vector of [`Node`] objects that define the structure of the tree.
    pub nodes: Vec<Node<X, BoundingBox<[S; D]>>>,

    /// Aggregate of each node: the total mass of the particles below it,
    /// placed at their center of mass.
    ///
    /// The `data` vector is parallel to the `nodes` vector, so the `i`-th
    /// element of the `data` vector corresponds to the `i`-th element of the
    /// `nodes` vector.
    pub data: Vec<PointMass<T, S>>,

    /// The point-masses the tree was built from, in input order.
    pub points: Vec<PointMass<T, S>>,

    /// Particle indices referenced by [`Node::External`] nodes.
    pub members: Vec<u32>,
}

/// An [`Orthtree`] partitioning 2D space into quadrants.
pub type Quadtree<T, S> = Orthtree<4, 2, T, S>;

/// An [`Orthtree`] partitioning 3D space into octants.
pub type Octree<T, S> = Orthtree<8, 3, T, S>;

impl<const X: usize, const D: usize, T, S> Orthtree<X, D, T, S>
where
    S: Scalar,
    T: Vector<Scalar = S, Array = [S; D]>,
    Const<D>: SubDivide<Division = Const<X>>,
{
    /// Builds a new [`Orthtree`] from the given point-masses inside the given
    /// bounding box.
    ///
    /// An empty input produces a tree without nodes.
    pub fn build(points: Vec<PointMass<T, S>>, bbox: BoundingBox<[S; D]>) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(points.len() * 2),
            data: Vec::with_capacity(points.len() * 2),
            members: Vec::with_capacity(points.len()),
            points,
        };

        let input: Vec<_> = tree
            .points
            .iter()
            .enumerate()
            .map(|(index, &point)| (index as u32, point))
            .collect();

        tree.build_node(&input, bbox, 0);
        tree
    }

    /// Returns the id of the root node, absent when the tree holds no
    /// particles.
    #[inline]
    pub fn root(&self) -> Option<NodeID> {
        (!self.nodes.is_empty()).then_some(0)
    }

    /// Returns the indices of the particles held by an external node.
    #[inline]
    pub fn members(&self, first: u32, count: u32) -> &[u32] {
        &self.members[first as usize..(first + count) as usize]
    }

    fn build_node(
        &mut self,
        input: &[(u32, PointMass<T, S>)],
        bbox: BoundingBox<[S; D]>,
        depth: u32,
    ) -> Option<NodeID> {
        if input.is_empty() {
            return None;
        }

        let id = self.nodes.len();
        self.nodes.push(Node::External { first: 0, count: 0 });
        self.data.push(Self::aggregate(input));

        let divisible = input
            .windows(2)
            .any(|pair| pair[0].1.position != pair[1].1.position);

        if divisible && depth < MAX_DEPTH {
            let center = bbox.center();
            let mut regions = bbox.subdivide::<X>().map(|bbox| (Vec::new(), bbox));

            for &(index, point) in input {
                let position: [S; D] = point.position.into();
                let region = (0..D).fold(0, |region, j| {
                    region + (usize::from(position[j] < center[j]) << j)
                });

                regions[region].0.push((index, point));
            }

            self.nodes[id] = Node::Internal(SizedOrthant {
                orthant: regions.map(|(input, bbox)| self.build_node(&input, bbox, depth + 1)),
                bbox,
            });
        } else {
            let first = self.members.len() as u32;
            self.members.extend(input.iter().map(|&(index, _)| index));

            self.nodes[id] = Node::External {
                first,
                count: input.len() as u32,
            };
        }

        Some(id as NodeID)
    }

    /// Total mass of a set of point-masses placed at their center of mass.
    ///
    /// A set with zero total mass has no meaningful centroid and aggregates
    /// to a zero vector; the traversal never uses such an aggregate.
    fn aggregate(input: &[(u32, PointMass<T, S>)]) -> PointMass<T, S> {
        let mass = input.iter().map(|(_, point)| point.mass).sum();

        let position = if mass == S::default() {
            T::default()
        } else {
            input
                .iter()
                .map(|(_, point)| point.position * (point.mass / mass))
                .sum()
        };

        PointMass::new(position, mass)
    }

    /// Returns the force the particles below `node` exert on `probe`,
    /// approximated with the given opening parameter `theta` and accumulated
    /// with the given kernel.
    ///
    /// An internal node whose longest side `w` and distance `d` to the probe
    /// satisfy `w / d < theta` contributes as a single point-mass at its
    /// center of mass; any other internal node is descended into. External
    /// nodes invoke the kernel once per held particle, skipping the one at
    /// index `exclude` so a probe that is part of the tree does not interact
    /// with itself.
    ///
    /// With `theta = 0` no node is ever aggregated and the result is the
    /// exact sum over all particles. `theta` must be non-negative.
    pub fn force_at<F>(
        &self,
        node: Option<NodeID>,
        probe: PointMass<T, S>,
        exclude: Option<u32>,
        theta: S,
        kernel: &mut F,
    ) -> T
    where
        F: FnMut(S, S, T) -> T,
    {
        let Some(id) = node else {
            return T::default();
        };
        let id = id as usize;

        match &self.nodes[id] {
            Node::External { first, count } => self
                .members(*first, *count)
                .iter()
                .filter(|&&member| exclude != Some(member))
                .fold(T::default(), |force, &member| {
                    let point = self.points[member as usize];
                    force + kernel(probe.mass, point.mass, point.position - probe.position)
                }),
            Node::Internal(SizedOrthant { orthant, bbox }) => {
                let aggregate = self.data[id];
                let dir = aggregate.position - probe.position;
                let mag_2 = dir.length_squared();
                let width = bbox.width();

                if aggregate.mass != S::default()
                    && mag_2 != S::default()
                    && width * width < theta * theta * mag_2
                {
                    kernel(probe.mass, aggregate.mass, dir)
                } else {
                    orthant.iter().fold(T::default(), |force, &child| {
                        force + self.force_at(child, probe, exclude, theta, kernel)
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_points(n: usize, seed: u64) -> Vec<PointMass<DVec2, f64>> {
        let mut rng = StdRng::seed_from_u64(seed);

        (0..n)
            .map(|_| {
                PointMass::new(
                    DVec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)),
                    rng.gen_range(0.1..10.0),
                )
            })
            .collect()
    }

    fn quadtree(points: Vec<PointMass<DVec2, f64>>) -> Quadtree<DVec2, f64> {
        let bbox = BoundingBox::containing(points.iter().map(|p| p.position.into()));
        Quadtree::build(points, bbox)
    }

    /// Collects the members below `node`, checking the aggregate and the
    /// bounds of every node on the way.
    fn check_subtree(
        tree: &Quadtree<DVec2, f64>,
        node: Option<NodeID>,
        region: &BoundingBox<[f64; 2]>,
    ) -> Vec<u32> {
        let Some(id) = node else {
            return Vec::new();
        };

        let collected = match &tree.nodes[id as usize] {
            Node::External { first, count } => tree.members(*first, *count).to_vec(),
            Node::Internal(SizedOrthant { orthant, bbox }) => {
                assert_eq!(bbox, region);

                orthant
                    .iter()
                    .zip(&bbox.subdivide::<4>())
                    .flat_map(|(&child, sub_region)| check_subtree(tree, child, sub_region))
                    .collect()
            }
        };

        assert!(!collected.is_empty());

        let mass: f64 = collected.iter().map(|&i| tree.points[i as usize].mass).sum();
        let center = collected
            .iter()
            .map(|&i| tree.points[i as usize])
            .map(|p| p.position * p.mass)
            .sum::<DVec2>()
            / mass;

        let aggregate = tree.data[id as usize];
        assert!((aggregate.mass - mass).abs() <= 1e-12 * mass.abs());
        assert!(aggregate.position.abs_diff_eq(center, 1e-9));

        for &member in &collected {
            assert!(region.contains(&tree.points[member as usize].position.into()));
        }

        collected
    }

    #[test]
    fn aggregates_and_bounds_hold_everywhere() {
        for seed in 0..4 {
            let tree = quadtree(random_points(256, seed));
            let root = tree.root();

            let bbox = BoundingBox::containing(tree.points.iter().map(|p| p.position.into()));
            let mut collected = check_subtree(&tree, root, &bbox);
            collected.sort_unstable();

            // Every particle ends up in exactly one external node.
            assert_eq!(collected, (0..256).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn empty_input_builds_no_nodes() {
        let tree = quadtree(Vec::new());

        assert!(tree.root().is_none());
        assert!(tree.nodes.is_empty());

        let probe = PointMass::new(DVec2::ZERO, 1.0);
        let force = tree.force_at(None, probe, None, 0.5, &mut |_, _, dir| dir);
        assert_eq!(force, DVec2::ZERO);
    }

    #[test]
    fn coincident_points_coalesce() {
        let position = DVec2::new(2.0, -3.0);
        let tree = quadtree(vec![
            PointMass::new(position, 1.0),
            PointMass::new(position, 2.0),
            PointMass::new(position, 3.0),
        ]);

        assert_eq!(tree.nodes.len(), 1);
        assert!(matches!(tree.nodes[0], Node::External { count: 3, .. }));
        assert_eq!(tree.data[0].mass, 6.0);
        assert!(tree.data[0].position.abs_diff_eq(position, 1e-12));
    }

    #[test]
    fn zero_mass_aggregates_to_zero_vector() {
        let tree = quadtree(vec![
            PointMass::new(DVec2::new(1.0, 1.0), 0.0),
            PointMass::new(DVec2::new(-1.0, -1.0), 0.0),
        ]);

        assert_eq!(tree.data[0], PointMass::new(DVec2::ZERO, 0.0));
    }

    #[test]
    fn zero_mass_nodes_are_never_aggregated() {
        // Masses cancel, so the root aggregate is useless; the traversal has
        // to reach the leaves and report the exact kernel contributions.
        let points = vec![
            PointMass::new(DVec2::new(0.0, 0.0), 1.0),
            PointMass::new(DVec2::new(1.0, 0.0), -1.0),
        ];
        let tree = quadtree(points.clone());

        let probe = PointMass::new(DVec2::new(0.25, 0.8), 1.0);
        let mut calls = 0;
        let force = tree.force_at(tree.root(), probe, None, f64::MAX, &mut |m1, m2, dir| {
            calls += 1;
            crate::kernel::gravity(m1, m2, dir)
        });

        let exact = points.iter().fold(DVec2::ZERO, |force, point| {
            force + crate::kernel::gravity(probe.mass, point.mass, point.position - probe.position)
        });

        assert_eq!(calls, 2);
        assert!(force.abs_diff_eq(exact, 1e-12));
    }

    #[test]
    fn near_coincident_points_terminate() {
        let tree = quadtree(vec![
            PointMass::new(DVec2::new(0.0, 0.0), 1.0),
            PointMass::new(DVec2::new(f64::MIN_POSITIVE, 0.0), 1.0),
            PointMass::new(DVec2::new(10.0, 10.0), 1.0),
        ]);

        let mut calls = 0;
        let probe = PointMass::new(DVec2::new(10.0, 10.0), 1.0);
        tree.force_at(tree.root(), probe, Some(2), 0.0, &mut |m1, m2, dir| {
            calls += 1;
            crate::kernel::gravity(m1, m2, dir)
        });

        assert_eq!(calls, 2);
    }
}
