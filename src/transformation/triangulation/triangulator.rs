use super::DelaunayMesh;
use crate::math::{GridPoint, Point, Real};
use crate::shape::{Grid, Mesh};
use crate::utils::{orient2d, WeightedValue};
use std::collections::BinaryHeap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The worst-approximated sample of a triangle.
#[derive(Copy, Clone, Debug, Default)]
struct Candidate {
    /// The sample with the largest error, `None` if every sample is exact.
    sample: Option<GridPoint>,
    error: Real,
    /// Sum of the squared errors of the samples covered by the triangle.
    squared_error_sum: Real,
}

/// Greedy, error-driven triangulation of a heightmap.
///
/// The triangulation starts from the two triangles spanning the grid corners.
/// Each refinement step inserts the grid sample that is the worst approximated
/// by the current surface, until the error or the size budget given to
/// [`Triangulator::run`] is met.
///
/// Every triangle tracks its own worst sample. The triangles are kept in a
/// max-heap ordered by that error, ties going to the lowest row-major sample
/// index. Entries of triangles modified since they were queued are discarded
/// lazily when they reach the top of the heap.
///
/// # Example
///
/// ```
/// use heightmesh::Grid;
/// use heightmesh::transformation::Triangulator;
///
/// let grid = Grid::from_fn(5, 5, |x, y| if (x, y) == (2, 2) { 1.0 } else { 0.0 }).unwrap();
/// let mut triangulator = Triangulator::new(grid);
/// triangulator.run(0.01, 0, 0);
///
/// assert!(triangulator.error() <= 0.01);
/// assert!(triangulator.points(1.0).len() > 4);
/// ```
pub struct Triangulator {
    grid: Grid,
    mesh: DelaunayMesh,
    candidates: Vec<Candidate>,
    // (triangle, stamp) weighted by the error of the triangle candidate.
    queue: BinaryHeap<WeightedValue<(u32, u32)>>,
}

impl Triangulator {
    /// Creates the initial two-triangle approximation of `grid`.
    pub fn new(grid: Grid) -> Self {
        let x1 = grid.width() as i64 - 1;
        let y1 = grid.height() as i64 - 1;

        let mut result = Self {
            grid,
            mesh: DelaunayMesh::new(x1, y1),
            candidates: Vec::new(),
            queue: BinaryHeap::new(),
        };

        result.flush();
        result
    }

    /// The grid being triangulated.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The elevation of the grid sample at column `x` and row `y`.
    #[inline]
    pub fn height_at(&self, x: usize, y: usize) -> Real {
        self.grid.get(x, y)
    }

    /// Refines the triangulation until its maximum error is at most
    /// `max_error`.
    ///
    /// Refinement also stops once the mesh has at least `max_triangles`
    /// triangles or `max_points` vertices; a zero budget means unbounded. It
    /// always terminates: each step inserts a new grid sample, and samples
    /// without error are never inserted.
    pub fn run(&mut self, max_error: Real, max_triangles: usize, max_points: usize) {
        log::debug!(
            "Triangulating a {}x{} grid (max error: {}, max triangles: {}, max points: {}).",
            self.grid.width(),
            self.grid.height(),
            max_error,
            max_triangles,
            max_points
        );

        loop {
            if self.max_error() <= max_error {
                break;
            }

            if max_triangles > 0 && self.num_triangles() >= max_triangles {
                break;
            }

            if max_points > 0 && self.num_points() >= max_points {
                break;
            }

            if !self.refine() {
                break;
            }
        }

        log::debug!(
            "Triangulation done: {} points, {} triangles, error: {}.",
            self.num_points(),
            self.num_triangles(),
            self.max_error()
        );
    }

    /// Inserts the worst-approximated sample into the triangulation.
    ///
    /// Returns `false` without modifying anything if every sample is already
    /// exactly approximated.
    pub fn refine(&mut self) -> bool {
        let Some(top) = self.queue.pop() else {
            return false;
        };

        let (t, _) = top.value;
        let Some(sample) = self.candidates[t as usize].sample else {
            return false;
        };

        log::trace!(
            "Inserting ({}, {}) with error {} into triangle {}.",
            sample.x,
            sample.y,
            top.cost,
            t
        );

        let _ = self.mesh.insert(sample, t);
        self.flush();
        true
    }

    /// The maximum error of the current triangulation.
    ///
    /// This is the largest vertical distance between a grid sample and the
    /// surface, zero if every sample is exactly approximated.
    #[inline]
    pub fn max_error(&self) -> Real {
        self.queue.peek().map(|top| top.cost).unwrap_or(0.0)
    }

    /// Alias of [`Triangulator::max_error`].
    #[inline]
    pub fn error(&self) -> Real {
        self.max_error()
    }

    /// The root-mean-square deviation between the surface and the grid.
    ///
    /// Samples lying on an edge shared by two triangles are counted twice.
    pub fn rms_deviation(&self) -> Real {
        let sum: Real = self.candidates.iter().map(|c| c.squared_error_sum).sum();
        (sum / self.grid.len() as Real).sqrt()
    }

    /// The number of vertices of the triangulation.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.mesh.num_points()
    }

    /// The number of triangles of the triangulation.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.mesh.num_triangles()
    }

    /// The vertices of the triangulation, in insertion order.
    ///
    /// Their `z` coordinate is the elevation multiplied by `z_scale`.
    pub fn points(&self, z_scale: Real) -> Vec<Point<Real>> {
        self.mesh
            .coords()
            .iter()
            .map(|p| {
                let z = self.grid.get(p.x as usize, p.y as usize);
                Point::new(p.x as Real, p.y as Real, z * z_scale)
            })
            .collect()
    }

    /// The triangles of the triangulation, counter-clockwise in grid-XY.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.mesh.triangles().to_vec()
    }

    /// Converts the current triangulation into a mesh, scaling elevations by
    /// `z_scale`.
    pub fn into_mesh(self, z_scale: Real) -> Mesh {
        Mesh::new(self.points(z_scale), self.triangles(), self.max_error())
    }

    /// Rasterizes every triangle created or modified since the last call,
    /// and queues its worst sample.
    fn flush(&mut self) {
        let pending = self.mesh.take_pending();

        #[cfg(feature = "parallel")]
        let found: Vec<Candidate> = pending
            .par_iter()
            .map(|t| find_candidate(&self.grid, &self.mesh, *t))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let found: Vec<Candidate> = pending
            .iter()
            .map(|t| find_candidate(&self.grid, &self.mesh, *t))
            .collect();

        self.candidates
            .resize(self.mesh.num_triangles(), Candidate::default());

        for (t, candidate) in pending.into_iter().zip(found) {
            self.candidates[t as usize] = candidate;

            if let Some(sample) = candidate.sample {
                let index = self.grid.index(sample.x as usize, sample.y as usize) as u64;
                let rank = (index << 32) | t as u64;
                self.queue.push(WeightedValue::new(
                    (t, self.mesh.stamp(t)),
                    candidate.error,
                    rank,
                ));
            }
        }

        // Drop stale entries so the top of the queue is always up to date.
        while let Some(top) = self.queue.peek() {
            let (t, stamp) = top.value;

            if self.mesh.stamp(t) == stamp {
                break;
            }

            let _ = self.queue.pop();
        }
    }
}

/// Finds the sample of the triangle `t` with the largest approximation error.
///
/// The triangle vertices are skipped. Samples are visited in row-major order
/// and only a strictly larger error replaces the current one, so ties go to
/// the lowest grid index.
fn find_candidate(grid: &Grid, mesh: &DelaunayMesh, t: u32) -> Candidate {
    let [a, b, c] = mesh.triangle_coords(t);
    let area = orient2d(&a, &b, &c);

    if area <= 0 {
        return Candidate::default();
    }

    let height = |p: &GridPoint| grid.get(p.x as usize, p.y as usize);
    let (za, zb, zc) = (height(&a), height(&b), height(&c));
    let area = area as Real;

    let min_x = a.x.min(b.x).min(c.x);
    let max_x = a.x.max(b.x).max(c.x);
    let min_y = a.y.min(b.y).min(c.y);
    let max_y = a.y.max(b.y).max(c.y);

    let mut result = Candidate::default();

    for y in min_y..=max_y {
        let mut was_inside = false;

        for x in min_x..=max_x {
            let p = GridPoint::new(x, y);
            let wa = orient2d(&b, &c, &p);
            let wb = orient2d(&c, &a, &p);
            let wc = orient2d(&a, &b, &p);

            if wa < 0 || wb < 0 || wc < 0 {
                if was_inside {
                    // Triangles are convex: the rest of the row is outside.
                    break;
                }

                continue;
            }

            was_inside = true;

            if p == a || p == b || p == c {
                continue;
            }

            let z = (wa as Real * za + wb as Real * zb + wc as Real * zc) / area;
            let dz = (z - height(&p)).abs();
            result.squared_error_sum += dz * dz;

            if dz > result.error {
                result.error = dz;
                result.sample = Some(p);
            }
        }
    }

    result
}
