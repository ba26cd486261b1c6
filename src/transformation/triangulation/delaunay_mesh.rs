use crate::math::GridPoint;
use crate::utils::{in_circle, orient2d};

/// Index of a missing half-edge twin, i.e., of an edge on the hull.
pub const INVALID: u32 = u32::MAX;

/// An incrementally refined Delaunay triangulation of a rectangle.
///
/// Triangles are stored as counter-clockwise vertex triples. Half-edge `3 * t + k`
/// goes from vertex `k` to vertex `(k + 1) % 3` of the triangle `t`, and
/// `half_edges[e]` is the index of its twin in the adjacent triangle, or
/// [`INVALID`] on the hull.
///
/// Triangle slots are reused when an insertion or an edge flip replaces a
/// triangle. Every rewrite of a slot bumps its stamp, and the slot is recorded
/// as pending until [`DelaunayMesh::take_pending`] is called.
#[derive(Clone, Debug)]
pub struct DelaunayMesh {
    coords: Vec<GridPoint>,
    triangles: Vec<[u32; 3]>,
    half_edges: Vec<u32>,
    stamps: Vec<u32>,
    pending: Vec<u32>,
}

impl DelaunayMesh {
    /// Triangulates the rectangle `[0, x1] x [0, y1]`.
    ///
    /// The four corners become the vertices `0: (0, 0)`, `1: (x1, 0)`,
    /// `2: (0, y1)` and `3: (x1, y1)`, and the rectangle is split along its
    /// `0-3` diagonal.
    pub fn new(x1: i64, y1: i64) -> Self {
        let mut result = Self {
            coords: Vec::new(),
            triangles: Vec::new(),
            half_edges: Vec::new(),
            stamps: Vec::new(),
            pending: Vec::new(),
        };

        let p0 = result.add_point(GridPoint::new(0, 0));
        let p1 = result.add_point(GridPoint::new(x1, 0));
        let p2 = result.add_point(GridPoint::new(0, y1));
        let p3 = result.add_point(GridPoint::new(x1, y1));

        let t0 = result.add_triangle(p0, p1, p3, INVALID, INVALID, INVALID, None);
        let _ = result.add_triangle(p0, p3, p2, t0 + 2, INVALID, INVALID, None);

        result
    }

    /// The vertex coordinates, in insertion order.
    #[inline]
    pub fn coords(&self) -> &[GridPoint] {
        &self.coords
    }

    /// The triangles, as counter-clockwise vertex triples.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The twin of every half-edge.
    #[inline]
    pub fn half_edges(&self) -> &[u32] {
        &self.half_edges
    }

    /// The number of vertices.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    /// The number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The number of times the slot of the triangle `t` has been rewritten.
    #[inline]
    pub fn stamp(&self, t: u32) -> u32 {
        self.stamps[t as usize]
    }

    /// The three vertex coordinates of the triangle `t`.
    #[inline]
    pub fn triangle_coords(&self, t: u32) -> [GridPoint; 3] {
        self.triangles[t as usize].map(|i| self.coords[i as usize])
    }

    /// Returns the sorted, deduplicated list of triangles created or rewritten
    /// since the last call.
    pub fn take_pending(&mut self) -> Vec<u32> {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_unstable();
        pending.dedup();
        pending
    }

    /// Finds a triangle containing `p`, boundary included.
    ///
    /// Zero-area triangles are skipped. This is a linear scan.
    pub fn locate(&self, p: &GridPoint) -> Option<u32> {
        (0..self.triangles.len() as u32).find(|t| {
            let [a, b, c] = self.triangle_coords(*t);
            orient2d(&a, &b, &c) > 0
                && orient2d(&b, &c, p) >= 0
                && orient2d(&c, &a, p) >= 0
                && orient2d(&a, &b, p) >= 0
        })
    }

    /// Inserts `p` wherever it lies in the triangulation.
    ///
    /// Returns the index of the new vertex, or `None` if `p` is outside of the
    /// triangulated rectangle or coincides with an existing vertex.
    pub fn insert_point(&mut self, p: GridPoint) -> Option<u32> {
        let t = self.locate(&p)?;

        if self.triangle_coords(t).contains(&p) {
            return None;
        }

        Some(self.insert(p, t))
    }

    /// Inserts the point `p`, lying inside the triangle `t` or on its
    /// boundary, and restores the Delaunay property around it.
    ///
    /// `p` must not be a vertex of `t`. Returns the index of the new vertex.
    pub fn insert(&mut self, p: GridPoint, t: u32) -> u32 {
        let e0 = 3 * t;
        let e1 = e0 + 1;
        let e2 = e0 + 2;

        let [p0, p1, p2] = self.triangles[t as usize];
        let [a, b, c] = self.triangle_coords(t);

        let pn = self.add_point(p);

        if orient2d(&a, &b, &p) == 0 {
            self.handle_collinear(pn, e0);
        } else if orient2d(&b, &c, &p) == 0 {
            self.handle_collinear(pn, e1);
        } else if orient2d(&c, &a, &p) == 0 {
            self.handle_collinear(pn, e2);
        } else {
            let h0 = self.half_edges[e0 as usize];
            let h1 = self.half_edges[e1 as usize];
            let h2 = self.half_edges[e2 as usize];

            let t0 = self.add_triangle(p0, p1, pn, h0, INVALID, INVALID, Some(t));
            let t1 = self.add_triangle(p1, p2, pn, h1, INVALID, t0 + 1, None);
            let t2 = self.add_triangle(p2, p0, pn, h2, t0 + 2, t1 + 1, None);

            self.legalize(t0);
            self.legalize(t1);
            self.legalize(t2);
        }

        pn
    }

    fn add_point(&mut self, p: GridPoint) -> u32 {
        self.coords.push(p);
        (self.coords.len() - 1) as u32
    }

    /// Adds the triangle `a, b, c`, or overwrites the slot `slot` with it.
    ///
    /// `ab`, `bc` and `ca` are the twins of its three half-edges; the twins are
    /// linked back to the new half-edges. Returns the first half-edge.
    fn add_triangle(
        &mut self,
        a: u32,
        b: u32,
        c: u32,
        ab: u32,
        bc: u32,
        ca: u32,
        slot: Option<u32>,
    ) -> u32 {
        let t = match slot {
            Some(t) => {
                self.triangles[t as usize] = [a, b, c];
                self.stamps[t as usize] = self.stamps[t as usize].wrapping_add(1);
                t
            }
            None => {
                self.triangles.push([a, b, c]);
                self.half_edges.extend_from_slice(&[INVALID; 3]);
                self.stamps.push(0);
                (self.triangles.len() - 1) as u32
            }
        };

        let e = 3 * t;

        for (k, twin) in [ab, bc, ca].into_iter().enumerate() {
            self.half_edges[e as usize + k] = twin;

            if twin != INVALID {
                self.half_edges[twin as usize] = e + k as u32;
            }
        }

        self.pending.push(t);
        e
    }

    #[inline]
    fn vertex(&self, e: u32) -> u32 {
        self.triangles[(e / 3) as usize][(e % 3) as usize]
    }

    /// Flips the edge `a` if the pair of triangles sharing it is not
    /// Delaunay, then recursively checks the two edges facing the flip.
    ///
    /// `p1` is tested against the circumcircle of `[p0, pr, pl]`:
    ///
    /// ```text
    ///           pl                    pl
    ///          /||\                  /  \
    ///       al/ || \bl            al/    \a
    ///        /  ||  \              /      \
    ///       /  a||b  \    flip    /___ar___\
    ///     p0\   ||   /p1   =>   p0\---bl---/p1
    ///        \  ||  /              \      /
    ///       ar\ || /br             b\    /br
    ///          \||/                  \  /
    ///           pr                    pr
    /// ```
    fn legalize(&mut self, a: u32) {
        let b = self.half_edges[a as usize];

        if b == INVALID {
            return;
        }

        let a0 = a - a % 3;
        let b0 = b - b % 3;
        let al = a0 + (a + 1) % 3;
        let ar = a0 + (a + 2) % 3;
        let bl = b0 + (b + 2) % 3;
        let br = b0 + (b + 1) % 3;

        let p0 = self.vertex(ar);
        let pr = self.vertex(a);
        let pl = self.vertex(al);
        let p1 = self.vertex(bl);

        let coords = &self.coords;
        if !in_circle(
            &coords[p0 as usize],
            &coords[pr as usize],
            &coords[pl as usize],
            &coords[p1 as usize],
        ) {
            return;
        }

        let hal = self.half_edges[al as usize];
        let har = self.half_edges[ar as usize];
        let hbl = self.half_edges[bl as usize];
        let hbr = self.half_edges[br as usize];

        let t0 = self.add_triangle(p0, p1, pl, INVALID, hbl, hal, Some(a0 / 3));
        let t1 = self.add_triangle(p1, p0, pr, t0, har, hbr, Some(b0 / 3));

        self.legalize(t0 + 1);
        self.legalize(t1 + 2);
    }

    /// Inserts `pn`, lying on the half-edge `a`, by splitting the triangles on
    /// both sides of it.
    fn handle_collinear(&mut self, pn: u32, a: u32) {
        let a0 = a - a % 3;
        let al = a0 + (a + 1) % 3;
        let ar = a0 + (a + 2) % 3;
        let p0 = self.vertex(ar);
        let pr = self.vertex(a);
        let pl = self.vertex(al);
        let hal = self.half_edges[al as usize];
        let har = self.half_edges[ar as usize];

        let b = self.half_edges[a as usize];

        if b == INVALID {
            // Hull edge: only one triangle to split.
            let t0 = self.add_triangle(pn, p0, pr, INVALID, har, INVALID, Some(a0 / 3));
            let t1 = self.add_triangle(p0, pn, pl, t0, INVALID, hal, None);
            self.legalize(t0 + 1);
            self.legalize(t1 + 2);
            return;
        }

        let b0 = b - b % 3;
        let bl = b0 + (b + 2) % 3;
        let br = b0 + (b + 1) % 3;
        let p1 = self.vertex(bl);
        let hbl = self.half_edges[bl as usize];
        let hbr = self.half_edges[br as usize];

        let t0 = self.add_triangle(p0, pr, pn, har, INVALID, INVALID, Some(a0 / 3));
        let t1 = self.add_triangle(pr, p1, pn, hbr, INVALID, t0 + 1, Some(b0 / 3));
        let t2 = self.add_triangle(p1, pl, pn, hbl, INVALID, t1 + 1, None);
        let t3 = self.add_triangle(pl, p0, pn, hal, t0 + 2, t2 + 1, None);

        self.legalize(t0);
        self.legalize(t1);
        self.legalize(t2);
        self.legalize(t3);
    }
}
