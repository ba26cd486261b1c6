//! Data model: the elevation grid and the triangle mesh built from it.

pub use self::grid::Grid;
pub use self::invalid_input::InvalidInput;
pub use self::mesh::Mesh;

mod grid;
mod invalid_input;
mod mesh;
