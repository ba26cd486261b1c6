use crate::math::Real;
use crate::shape::InvalidInput;

/// A regular raster of elevation samples, stored in row-major order.
///
/// The sample at column `x` and row `y` is `values[y * width + x]`. A grid
/// always holds exactly `width * height` finite values: every constructor
/// checks it, and every transformation that changes the dimensions resizes
/// the values accordingly.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    values: Vec<Real>,
}

impl Grid {
    /// Creates a grid from its dimensions and its row-major elevations.
    ///
    /// Fails if a dimension is zero, if `values.len() != width * height`, or
    /// if a value is not finite.
    pub fn new(width: usize, height: usize, values: Vec<Real>) -> Result<Self, InvalidInput> {
        if width == 0 || height == 0 {
            return Err(InvalidInput::EmptyGrid { width, height });
        }

        if width.checked_mul(height) != Some(values.len()) {
            return Err(InvalidInput::DimensionMismatch {
                width,
                height,
                len: values.len(),
            });
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(InvalidInput::NonFiniteElevation { index });
        }

        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Creates a grid by evaluating `f(x, y)` at every sample.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Real,
    ) -> Result<Self, InvalidInput> {
        let mut values = Vec::with_capacity(width.saturating_mul(height));

        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }

        Self::new(width, height, values)
    }

    /// Creates a grid where every sample has the same elevation.
    pub fn constant(width: usize, height: usize, value: Real) -> Result<Self, InvalidInput> {
        Self::from_fn(width, height, |_, _| value)
    }

    /// The number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a grid holds at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row-major elevation values.
    #[inline]
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Consumes the grid, returning its row-major elevation values.
    pub fn into_values(self) -> Vec<Real> {
        self.values
    }

    /// The row-major index of the sample at column `x` and row `y`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// The elevation of the sample at column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Real {
        assert!(x < self.width && y < self.height);
        self.values[self.index(x, y)]
    }

    /// The smallest and largest elevations of this grid.
    pub fn min_max(&self) -> (Real, Real) {
        self.values
            .iter()
            .fold((Real::MAX, Real::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Real] {
        &mut self.values
    }

    /// Replaces the dimensions and values at once.
    ///
    /// The caller guarantees `values.len() == width * height`.
    pub(crate) fn reshape(&mut self, width: usize, height: usize, values: Vec<Real>) {
        debug_assert_eq!(values.len(), width * height);
        self.width = width;
        self.height = height;
        self.values = values;
    }
}
