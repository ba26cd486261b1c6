use crate::math::{Point, Real};
use crate::utils::SortedPair;
use hashbrown::{HashMap, HashSet};

/// A triangle mesh approximating a heightmap.
///
/// Vertices are `(x, y, z)` points where `x` and `y` are grid coordinates and
/// `z` is the scaled elevation. Triangles are triples of indices into the
/// vertex list; the surface triangles are counter-clockwise when seen from
/// `+z`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Mesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    achieved_error: Real,
}

impl Mesh {
    /// Creates a mesh from its vertices, triangle indices and achieved error.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>, achieved_error: Real) -> Self {
        Self {
            vertices,
            indices,
            achieved_error,
        }
    }

    /// The vertices of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The triangles of this mesh, as triples of vertex indices.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The largest vertical distance between the surface and the source grid,
    /// measured at the grid samples, in unscaled elevation units.
    #[inline]
    pub fn achieved_error(&self) -> Real {
        self.achieved_error
    }

    /// The number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Consumes the mesh, returning its vertices and indices.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        (self.vertices, self.indices)
    }

    /// The vertex positions as a flat buffer.
    ///
    /// The layout is vertex-major: `[x0, y0, z0, x1, y1, z1, ...]`, so vertex
    /// `i` occupies the entries `3 * i .. 3 * i + 3`.
    pub fn vertex_buffer(&self) -> Vec<Real> {
        self.vertices.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// The triangle indices as a flat buffer.
    ///
    /// The layout is triangle-major: `[a0, b0, c0, a1, b1, c1, ...]`, so
    /// triangle `i` occupies the entries `3 * i .. 3 * i + 3`.
    pub fn index_buffer(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }

    /// The boundary of this mesh as an ordered loop of vertex indices.
    ///
    /// A boundary edge is a directed edge `a -> b` of a triangle for which no
    /// triangle contains the edge `b -> a`. The loop starts at the boundary
    /// vertex with the smallest index and follows the orientation of the
    /// triangles, so the surface lies on the left of each `loop[i] ->
    /// loop[i + 1]` edge.
    ///
    /// Returns an empty vector if the mesh is closed. If the boundary is made
    /// of several loops, only the one containing the smallest boundary vertex
    /// is returned.
    pub fn boundary_loop(&self) -> Vec<u32> {
        let edges: HashSet<(u32, u32)> = self
            .indices
            .iter()
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .collect();

        let next: HashMap<u32, u32> = edges
            .iter()
            .filter(|(a, b)| !edges.contains(&(*b, *a)))
            .copied()
            .collect();

        let Some(start) = next.keys().min().copied() else {
            return Vec::new();
        };

        let mut result = vec![start];
        let mut curr = start;

        while let Some(&succ) = next.get(&curr) {
            if succ == start || result.len() > next.len() {
                break;
            }

            result.push(succ);
            curr = succ;
        }

        result
    }

    /// Returns `true` if this mesh is a closed, consistently oriented surface.
    ///
    /// Every undirected edge must be shared by exactly two triangles, which
    /// traverse it in opposite directions.
    pub fn is_watertight(&self) -> bool {
        if self.indices.is_empty() {
            return false;
        }

        let mut directed = HashSet::new();
        let mut undirected: HashMap<SortedPair<u32>, usize> = HashMap::new();

        for t in &self.indices {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                if !directed.insert((a, b)) {
                    // The same directed edge appears twice: inconsistent orientation.
                    return false;
                }

                *undirected.entry(SortedPair::new(a, b)).or_insert(0) += 1;
            }
        }

        undirected.values().all(|count| *count == 2)
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut Vec<Point<Real>> {
        &mut self.vertices
    }

    pub(crate) fn indices_mut(&mut self) -> &mut Vec<[u32; 3]> {
        &mut self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
        ];
        Mesh::new(vertices, vec![[0, 1, 3], [0, 3, 2]], 0.0)
    }

    #[test]
    fn flat_buffers() {
        let mesh = square();
        assert_eq!(
            mesh.vertex_buffer(),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0]
        );
        assert_eq!(mesh.index_buffer(), vec![0, 1, 3, 0, 3, 2]);
    }

    #[test]
    fn square_boundary() {
        let mesh = square();
        assert_eq!(mesh.boundary_loop(), vec![0, 1, 3, 2]);
        assert!(!mesh.is_watertight());
    }

    #[test]
    fn tetrahedron_is_watertight() {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        let mut mesh = Mesh::new(
            vertices,
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
            0.0,
        );
        assert!(mesh.is_watertight());
        assert!(mesh.boundary_loop().is_empty());

        // Flipping one face breaks the orientation consistency.
        mesh.indices_mut()[0] = [0, 1, 2];
        assert!(!mesh.is_watertight());
    }
}
