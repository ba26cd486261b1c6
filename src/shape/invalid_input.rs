use crate::math::Real;

/// Errors reported when the input of the meshing pipeline is malformed.
///
/// These are the only failures of this crate: they are all detected before
/// any processing starts, and once triangulation begins it always terminates
/// with a mesh.
///
/// # Example
///
/// ```
/// use heightmesh::{Grid, InvalidInput};
///
/// // Three values cannot fill a 2x2 grid.
/// let result = Grid::new(2, 2, vec![0.0, 1.0, 2.0]);
/// assert_eq!(
///     result.unwrap_err(),
///     InvalidInput::DimensionMismatch { width: 2, height: 2, len: 3 }
/// );
/// ```
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum InvalidInput {
    /// The grid has a zero width or a zero height.
    #[error("the grid must have a positive width and height, got {width}x{height}.")]
    EmptyGrid {
        /// The requested width.
        width: usize,
        /// The requested height.
        height: usize,
    },
    /// The number of elevation values does not match the grid dimensions.
    #[error("a {width}x{height} grid cannot hold {len} elevation values.")]
    DimensionMismatch {
        /// The requested width.
        width: usize,
        /// The requested height.
        height: usize,
        /// The number of values actually given.
        len: usize,
    },
    /// An elevation value is NaN or infinite.
    #[error("the elevation at index {index} is not finite.")]
    NonFiniteElevation {
        /// The row-major index of the offending sample.
        index: usize,
    },
    /// A configuration parameter is out of its valid range.
    #[error("invalid value {value} for the parameter `{name}`.")]
    InvalidParameter {
        /// The name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: Real,
    },
}
