use crate::math::Real;
use crate::pipeline::Config;
use crate::shape::Grid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies the heightmap transforms enabled by `config`, in this order:
/// leveling, inversion, Gaussian blur, gamma curve, border.
///
/// A stage with a non-positive parameter (`blur_sigma`, `gamma`,
/// `border_size`) is skipped.
pub fn preprocess(mut grid: Grid, config: &Config) -> Grid {
    if config.level {
        log::debug!("Auto-leveling the heightmap.");
        grid.auto_level();
    }

    if config.invert {
        log::debug!("Inverting the heightmap.");
        grid.invert();
    }

    if config.blur_sigma > 0.0 {
        log::debug!("Blurring the heightmap (sigma: {}).", config.blur_sigma);
        grid.gaussian_blur(config.blur_sigma);
    }

    if config.gamma > 0.0 {
        log::debug!("Applying a gamma curve (gamma: {}).", config.gamma);
        grid.gamma_curve(config.gamma);
    }

    if config.border_size > 0 {
        log::debug!(
            "Adding a border (size: {}, height: {}).",
            config.border_size,
            config.border_height
        );
        grid.add_border(config.border_size, config.border_height);
    }

    grid
}

impl Grid {
    /// Linearly rescales the elevations so they span `[0, 1]`.
    ///
    /// A constant grid is left unchanged.
    pub fn auto_level(&mut self) {
        let (lo, hi) = self.min_max();

        if hi <= lo {
            return;
        }

        let range = hi - lo;
        self.values_mut()
            .iter_mut()
            .for_each(|v| *v = (*v - lo) / range);
    }

    /// Reflects the elevations about the middle of their range:
    /// `v' = max - (v - min)`.
    ///
    /// The range itself is unchanged, so inverting twice restores the grid.
    pub fn invert(&mut self) {
        let (lo, hi) = self.min_max();
        self.values_mut()
            .iter_mut()
            .for_each(|v| *v = hi - (*v - lo));
    }

    /// Convolves the elevations with a Gaussian kernel of standard deviation
    /// `sigma`.
    ///
    /// The kernel is separable, spans `ceil(3 * sigma)` samples on each side,
    /// and is normalized. Samples outside of the grid are clamped to the
    /// nearest edge sample. Does nothing if `sigma <= 0`.
    pub fn gaussian_blur(&mut self, sigma: Real) {
        if !(sigma > 0.0) {
            return;
        }

        let kernel = gaussian_kernel(sigma);
        let width = self.width();
        let height = self.height();
        let src = self.values().to_vec();
        let mut horizontal = vec![0.0; src.len()];

        let blur_row = |y: usize, row: &mut [Real]| {
            let line = &src[y * width..(y + 1) * width];
            for (x, out) in row.iter_mut().enumerate() {
                *out = convolve(&kernel, width, x, |i| line[i]);
            }
        };

        #[cfg(feature = "parallel")]
        horizontal
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| blur_row(y, row));
        #[cfg(not(feature = "parallel"))]
        horizontal
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| blur_row(y, row));

        let blur_column = |y: usize, row: &mut [Real]| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = convolve(&kernel, height, y, |j| horizontal[j * width + x]);
            }
        };

        #[cfg(feature = "parallel")]
        self.values_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| blur_column(y, row));
        #[cfg(not(feature = "parallel"))]
        self.values_mut()
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| blur_column(y, row));
    }

    /// Applies the gamma curve `t' = t^gamma` to the elevations normalized
    /// to their range, `t = (v - min) / (max - min)`, then maps them back to
    /// the same range.
    ///
    /// On a grid already leveled to `[0, 1]` this is exactly `v' = v^gamma`.
    /// Does nothing if `gamma <= 0` or if the grid is constant.
    pub fn gamma_curve(&mut self, gamma: Real) {
        if !(gamma > 0.0) {
            return;
        }

        let (lo, hi) = self.min_max();

        if hi <= lo {
            return;
        }

        let range = hi - lo;
        self.values_mut()
            .iter_mut()
            .for_each(|v| *v = lo + range * ((*v - lo) / range).powf(gamma));
    }

    /// Pads the grid with `size` samples of elevation `height` on every side.
    ///
    /// The width and height both grow by `2 * size`; the original samples are
    /// shifted by `(size, size)`.
    pub fn add_border(&mut self, size: usize, height: Real) {
        if size == 0 {
            return;
        }

        let w = self.width();
        let h = self.height();
        let new_w = w + 2 * size;
        let new_h = h + 2 * size;
        let mut values = vec![height; new_w * new_h];

        for (y, row) in self.values().chunks(w).enumerate() {
            let start = (y + size) * new_w + size;
            values[start..start + w].copy_from_slice(row);
        }

        self.reshape(new_w, new_h, values);
    }
}

/// A normalized, symmetric Gaussian kernel of `2 * ceil(3 * sigma) + 1` taps.
fn gaussian_kernel(sigma: Real) -> Vec<Real> {
    let radius = ((3.0 * sigma).ceil() as usize).max(1);
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<Real> = (0..=2 * radius)
        .map(|i| {
            let d = i as Real - radius as Real;
            (-d * d / denom).exp()
        })
        .collect();

    let sum: Real = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= sum);
    kernel
}

/// Convolves the kernel with the line of `len` samples `sample(i)` at `center`,
/// clamping out-of-range indices.
#[inline]
fn convolve(kernel: &[Real], len: usize, center: usize, sample: impl Fn(usize) -> Real) -> Real {
    let radius = kernel.len() / 2;

    kernel
        .iter()
        .enumerate()
        .map(|(k, weight)| {
            let i = (center + k).saturating_sub(radius).min(len - 1);
            weight * sample(i)
        })
        .sum()
}
