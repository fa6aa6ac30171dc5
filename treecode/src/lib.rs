//! # Treecode
//!
//! Treecode is a crate providing Barnes-Hut force approximation between
//! particles in Rust.
//!
//! ## Goals
//!
//! The main goal of this crate is to provide a simple API to compute the
//! pairwise interactions of N bodies in O(N log N) instead of O(N²), by
//! replacing clusters of distant bodies with their total mass placed at
//! their center of mass. The force law is not part of the engine: queries
//! take a kernel function, so gravitational, electrostatic or custom
//! interactions all use the same tree. Numerical integration and the
//! scheduling of queries are left to the caller.
//!
//! ## Using Treecode
//!
//! ### Implementing the [`Particle`] trait
//!
//! #### Deriving
//!
//! Used in most cases, when the type has fields named `position` and `mass`:
//!
//! ```
//! # use treecode::prelude::*;
//! # use glam::DVec2;
//! #[derive(Particle)]
//! struct Body {
//!     position: DVec2,
//!     mass: f64,
//! //  ...
//! }
//! ```
//!
//! #### Manual implementation
//!
//! Used when the type does not directly provide a position and a mass.
//!
//! ```
//! # use treecode::prelude::*;
//! # use glam::DVec2;
//! struct Body {
//!     position: DVec2,
//!     radius: f64,
//! }
//!
//! impl Particle for Body {
//!     type Scalar = f64;
//!     type Vector = DVec2;
//!
//!     fn coord(&self) -> DVec2 {
//!         self.position
//!     }
//!
//!     fn mass(&self) -> f64 {
//!         self.radius * self.radius
//!     }
//! }
//! ```
//!
//! ### Building a tree and querying forces
//!
//! A [`Plane`] partitions 2D space with a quadtree, a [`Volume`] partitions
//! 3D space with an octree. Both are built once over a collection of
//! particles and queried per probe with an opening parameter `theta` and a
//! force kernel; `theta = 0` recovers the exact all-pairs sum and larger
//! values trade accuracy for speed, typical accurate values lying between
//! 0.3 and 0.9.
//!
//! ```
//! # use treecode::prelude::*;
//! # use glam::DVec2;
//! # #[derive(Particle)]
//! # struct Body {
//! #     position: DVec2,
//! #     mass: f64,
//! # }
//! let plane = Plane::new(vec![
//!     Body { position: DVec2::new(-1.0, 0.0), mass: 1.0 },
//!     Body { position: DVec2::new(1.0, 0.0), mass: 1.0 },
//!     Body { position: DVec2::new(0.0, 2.0), mass: 0.5 },
//! ]);
//!
//! for (body, force) in plane.particles().iter().zip(plane.forces(0.5, kernel::gravity)) {
//!     // ...
//! }
//! ```
//!
//! Kernels are plain functions of the probe mass, the source mass and the
//! displacement vector from probe to source; [`kernel::gravity`] provides
//! inverse-square attraction. See the [`kernel`] module for the contract.
//!
//! Construction is single-threaded; a built tree is immutable and queries
//! only read it, so distinct probes may be processed from multiple threads.
//! With the `parallel` feature enabled, [`Plane::forces`] has a
//! [rayon](https://github.com/rayon-rs/rayon)-backed counterpart
//! `par_forces`.

#![warn(missing_docs)]

pub mod kernel;
/// Traits for particle representation of objects.
pub mod particle;
/// Barnes-Hut approximation in 2D space.
pub mod plane;
pub mod tree;
/// Scalar and vector abstractions over the underlying linear algebra types.
pub mod vector;
/// Barnes-Hut approximation in 3D space.
pub mod volume;

pub use particle::*;
pub use plane::*;
pub use volume::*;

pub use treecode_derive;

/// Commonly used types, re-exported.
pub mod prelude {
    pub use crate::{
        kernel,
        particle::{Particle, PointMass},
        plane::Plane,
        volume::Volume,
    };
    pub use treecode_derive::Particle;
}
