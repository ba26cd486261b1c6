//! The heightmap-to-mesh pipeline.

use crate::math::Real;
use crate::shape::{Grid, InvalidInput, Mesh};
use crate::transformation::{add_base, preprocess, Triangulator};

/// Parameters of the heightmap-to-mesh [`pipeline`].
///
/// Every preprocessing stage and the base extrusion are disabled by default.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
pub struct Config {
    /// The maximum vertical error between the mesh and the grid samples.
    pub max_error: Real,
    /// Multiplier applied to the elevations of the output vertices.
    pub z_scale: Real,
    /// Additional elevation multiplier, combined with `z_scale`.
    pub z_exaggeration: Real,
    /// Refinement stops once the mesh has that many triangles. `0` means unbounded.
    pub max_triangles: usize,
    /// Refinement stops once the mesh has that many vertices. `0` means unbounded.
    pub max_points: usize,
    /// Rescale the elevations to `[0, 1]` before anything else.
    pub level: bool,
    /// Reflect the elevations about the middle of their range.
    pub invert: bool,
    /// Standard deviation of the Gaussian blur, in samples. `0` disables it.
    pub blur_sigma: Real,
    /// Exponent of the gamma curve. `0` disables it.
    pub gamma: Real,
    /// Width of the border added around the grid, in samples. `0` disables it.
    pub border_size: usize,
    /// Elevation of the border samples.
    pub border_height: Real,
    /// Depth of the solid base extruded under the surface, before scaling.
    /// `0` disables it.
    pub base_height: Real,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_error: 0.001,
            z_scale: 1.0,
            z_exaggeration: 1.0,
            max_triangles: 0,
            max_points: 0,
            level: false,
            invert: false,
            blur_sigma: 0.0,
            gamma: 0.0,
            border_size: 0,
            border_height: 1.0,
            base_height: 0.0,
        }
    }
}

impl Config {
    /// Checks that every real parameter is finite and that `max_error` is
    /// non-negative.
    ///
    /// Non-positive stage parameters are valid: they disable their stage.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let params = [
            ("max_error", self.max_error),
            ("z_scale", self.z_scale),
            ("z_exaggeration", self.z_exaggeration),
            ("blur_sigma", self.blur_sigma),
            ("gamma", self.gamma),
            ("border_height", self.border_height),
            ("base_height", self.base_height),
        ];

        for (name, value) in params {
            if !value.is_finite() {
                return Err(InvalidInput::InvalidParameter { name, value });
            }
        }

        if self.max_error < 0.0 {
            return Err(InvalidInput::InvalidParameter {
                name: "max_error",
                value: self.max_error,
            });
        }

        Ok(())
    }

    /// The factor applied to elevations: `z_scale * z_exaggeration`.
    #[inline]
    pub fn z_factor(&self) -> Real {
        self.z_scale * self.z_exaggeration
    }
}

/// Turns `grid` into a triangle mesh approximating it within
/// `config.max_error`.
///
/// The grid is preprocessed, triangulated, scaled vertically by
/// [`Config::z_factor`], and, if `config.base_height > 0`, closed by a solid
/// base whose bottom lies at `z = -base_height * z_factor`. The result only
/// depends on `config` and `grid`.
///
/// Fails only if `config` is invalid; any valid input yields a mesh.
///
/// # Example
///
/// ```
/// use heightmesh::{pipeline, Config, Grid};
///
/// let grid = Grid::from_fn(8, 8, |x, y| if (x, y) == (4, 4) { 10.0 } else { 0.0 }).unwrap();
/// let config = Config {
///     base_height: 2.0,
///     ..Config::default()
/// };
/// let mesh = pipeline(&config, grid).unwrap();
///
/// assert!(mesh.achieved_error() <= config.max_error);
/// assert!(mesh.is_watertight());
/// ```
pub fn pipeline(config: &Config, grid: Grid) -> Result<Mesh, InvalidInput> {
    config.validate()?;

    let grid = preprocess(grid, config);
    let mut triangulator = Triangulator::new(grid);
    triangulator.run(config.max_error, config.max_triangles, config.max_points);

    let z_factor = config.z_factor();
    let mut mesh = triangulator.into_mesh(z_factor);

    if config.base_height > 0.0 {
        add_base(&mut mesh, -config.base_height * z_factor);
    }

    log::info!(
        "Meshed the heightmap: {} vertices, {} triangles, error: {}.",
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.achieved_error()
    );

    Ok(mesh)
}
