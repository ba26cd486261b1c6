//! Error-bounded adaptive triangulation of heightmaps.
//!
//! Refinement is greedy: the sample with the largest vertical error is
//! repeatedly inserted into an incrementally maintained Delaunay mesh.

pub use self::delaunay_mesh::{DelaunayMesh, INVALID};
pub use self::triangulator::Triangulator;

mod delaunay_mesh;
mod triangulator;
