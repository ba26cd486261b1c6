//! Transformation of heightmaps into meshes: preprocessing, triangulation and
//! finishing.

pub use self::add_base::add_base;
pub use self::preprocess::preprocess;
pub use self::rescale::{latitude_adjustment, rescale_positions};
pub use self::triangulation::{DelaunayMesh, Triangulator};

mod add_base;
mod preprocess;
mod rescale;
pub mod triangulation;

#[cfg(feature = "wavefront")]
pub mod wavefront;
