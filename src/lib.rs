/*!
heightmesh
==========

**heightmesh** turns a regular grid of elevation samples (a heightmap) into a
compact triangle mesh whose vertical error stays under a given bound.

The work is split in three stages run by [`pipeline::pipeline`]:

1. the heightmap is preprocessed in place (leveling, inversion, blur, gamma
   curve, border), see [`transformation::preprocess`];
2. the grid is triangulated by greedy insertion of its worst-approximated
   samples into a Delaunay mesh, see [`transformation::Triangulator`];
3. a solid base is optionally extruded under the surface, see
   [`transformation::add_base`].

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

pub extern crate nalgebra as na;

pub mod pipeline;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(not(feature = "f32"))]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Aliases for the mathematical types used by this crate.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The point type of mesh vertices.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// Integer grid coordinates, as stored by the triangulation.
    pub type GridPoint = Point2<i64>;
}

pub use crate::pipeline::{pipeline, Config};
pub use crate::shape::{Grid, InvalidInput, Mesh};
