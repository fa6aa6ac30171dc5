//! Pairwise force functions.
//!
//! A kernel is any `FnMut(m1, m2, dir) -> V` where `m1` is the mass of the
//! probe, `m2` the mass of the source (a particle or the aggregate of a
//! subtree) and `dir` the displacement vector from the probe to the source.
//! The traversal invokes the kernel for every contribution and sums the
//! returned vectors, so kernels must return a zero vector when they have
//! nothing to contribute, notably for a zero displacement.
//!
//! Kernels may carry state, for example a counter of invocations:
//! ```
//! # use treecode::prelude::*;
//! # use glam::DVec2;
//! # let plane = Plane::new(vec![(DVec2::ZERO, 1.0), (DVec2::ONE, 1.0)]);
//! let mut calls = 0;
//! let force = plane.force_on(0, 0.5, |m1, m2, dir| {
//!     calls += 1;
//!     kernel::gravity(m1, m2, dir)
//! });
//!
//! assert_eq!(calls, 1);
//! ```

use crate::vector::{Scalar, Vector};

/// Newtonian gravitational attraction between two point masses.
///
/// Returns `m1 * m2 * dir / |dir|³`, the inverse-square force `m2` exerts on
/// `m1` along `dir`, or a zero vector when the displacement is zero. No
/// gravitational constant is applied; scale the masses or the result by `G`
/// as needed.
///
/// ```
/// # use treecode::kernel;
/// # use glam::DVec2;
/// let force = kernel::gravity(2.0, 3.0, DVec2::new(2.0, 0.0));
///
/// assert_eq!(force, DVec2::new(1.5, 0.0));
/// assert_eq!(kernel::gravity(2.0, 3.0, DVec2::ZERO), DVec2::ZERO);
/// ```
#[inline]
pub fn gravity<T: Vector>(m1: T::Scalar, m2: T::Scalar, dir: T) -> T {
    let mag_2 = dir.length_squared();

    if mag_2 == <T::Scalar>::default() {
        T::default()
    } else {
        dir * (m1 * m2 / (mag_2 * mag_2.sqrt()))
    }
}
