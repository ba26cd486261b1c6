use super::triangulation::DelaunayMesh;
use crate::math::{GridPoint, Point, Real};
use crate::shape::Mesh;

/// Extrudes a flat solid base under the surface of `mesh`, down to the
/// altitude `base_z`.
///
/// The boundary loop of the surface is duplicated at `z = base_z`, each
/// boundary edge is connected to its copy by two "skirt" triangles, and the
/// bottom loop is closed by a cap facing `-z`. The resulting mesh is
/// watertight with outward-facing triangles, and keeps all the original
/// vertices and triangles at their original indices.
///
/// The surface is expected to be a triangulated grid rectangle, as produced by
/// the [`Triangulator`](super::Triangulator): its boundary vertices lie on the
/// rectangle and have integer `x, y` coordinates. The cap is then triangulated
/// the same way as the surface, by inserting the boundary vertices into a
/// Delaunay triangulation of the rectangle.
pub fn add_base(mesh: &mut Mesh, base_z: Real) {
    let boundary = mesh.boundary_loop();

    if boundary.len() < 3 {
        log::debug!("No boundary loop found: the base is not added.");
        return;
    }

    let first_bottom = mesh.num_vertices() as u32;
    let loop_len = boundary.len() as u32;

    let footprint: Vec<GridPoint> = boundary
        .iter()
        .map(|i| {
            let p = mesh.vertices()[*i as usize];
            GridPoint::new(p.x.round() as i64, p.y.round() as i64)
        })
        .collect();

    let bottom_vertices: Vec<Point<Real>> = boundary
        .iter()
        .map(|i| {
            let p = mesh.vertices()[*i as usize];
            Point::new(p.x, p.y, base_z)
        })
        .collect();
    mesh.vertices_mut().extend(bottom_vertices);

    let indices = mesh.indices_mut();
    let num_surface_triangles = indices.len();

    // Skirt: one quad per boundary edge, facing outward.
    for k in 0..loop_len {
        let a = boundary[k as usize];
        let b = boundary[((k + 1) % loop_len) as usize];
        let a_bottom = first_bottom + k;
        let b_bottom = first_bottom + (k + 1) % loop_len;

        indices.push([a, a_bottom, b_bottom]);
        indices.push([a, b_bottom, b]);
    }

    // Cap: counter-clockwise triangles of the footprint, reversed to face `-z`.
    indices.extend(
        triangulate_footprint(&footprint)
            .into_iter()
            .map(|[a, b, c]| [first_bottom + a, first_bottom + c, first_bottom + b]),
    );

    log::debug!(
        "Added a base at z = {}: {} boundary vertices, {} skirt and cap triangles.",
        base_z,
        loop_len,
        indices.len() - num_surface_triangles
    );
}

/// Triangulates the polygon `footprint`, a counter-clockwise loop of points
/// lying on the boundary of its bounding rectangle.
///
/// Returns counter-clockwise triangles indexing `footprint`. Falls back to a
/// fan around the first point if the rectangle has no area or if one of its
/// corners is missing from the loop.
fn triangulate_footprint(footprint: &[GridPoint]) -> Vec<[u32; 3]> {
    let n = footprint.len() as u32;
    let fan = || -> Vec<[u32; 3]> { (1..n - 1).map(|k| [0, k, k + 1]).collect() };

    let min_x = footprint.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = footprint.iter().map(|p| p.y).min().unwrap_or(0);
    let max_x = footprint.iter().map(|p| p.x).max().unwrap_or(0);
    let max_y = footprint.iter().map(|p| p.y).max().unwrap_or(0);

    if max_x == min_x || max_y == min_y {
        return fan();
    }

    let local: Vec<GridPoint> = footprint
        .iter()
        .map(|p| GridPoint::new(p.x - min_x, p.y - min_y))
        .collect();

    let mut delaunay = DelaunayMesh::new(max_x - min_x, max_y - min_y);
    // Maps the vertices of `delaunay` to their position in the footprint.
    let mut to_footprint = Vec::with_capacity(local.len());

    for corner in &delaunay.coords()[..4] {
        match local.iter().position(|p| p == corner) {
            Some(k) => to_footprint.push(k as u32),
            None => return fan(),
        }
    }

    for (k, p) in local.iter().enumerate() {
        if to_footprint[..4].contains(&(k as u32)) {
            continue;
        }

        match delaunay.insert_point(*p) {
            Some(_) => to_footprint.push(k as u32),
            None => return fan(),
        }
    }

    delaunay
        .triangles()
        .iter()
        .map(|t| t.map(|i| to_footprint[i as usize]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_of_a_subdivided_square() {
        let footprint = [
            GridPoint::new(0, 0),
            GridPoint::new(2, 0),
            GridPoint::new(4, 0),
            GridPoint::new(4, 4),
            GridPoint::new(0, 4),
            GridPoint::new(0, 2),
        ];
        let triangles = triangulate_footprint(&footprint);

        assert_eq!(triangles.len(), footprint.len() - 2);
        for [a, b, c] in triangles {
            let (a, b, c) = (
                footprint[a as usize],
                footprint[b as usize],
                footprint[c as usize],
            );
            assert!(crate::utils::orient2d(&a, &b, &c) > 0);
        }
    }

    #[test]
    fn base_of_a_square() {
        let vertices = vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(3.0, 0.0, 1.0),
            Point::new(0.0, 3.0, 1.0),
            Point::new(3.0, 3.0, 1.0),
        ];
        let mut mesh = Mesh::new(vertices, vec![[0, 1, 3], [0, 3, 2]], 0.0);
        add_base(&mut mesh, -2.0);

        assert_eq!(mesh.num_vertices(), 8);
        // 2 surface + 8 skirt + 2 cap triangles.
        assert_eq!(mesh.num_triangles(), 12);
        assert!(mesh.vertices()[4..].iter().all(|p| p.z == -2.0));
        assert!(mesh.is_watertight());
    }

    #[test]
    fn base_of_a_degenerate_strip() {
        let vertices = vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, 5.0, 1.0),
            Point::new(0.0, 5.0, 1.0),
        ];
        let mut mesh = Mesh::new(vertices, vec![[0, 1, 3], [0, 3, 2]], 0.0);
        add_base(&mut mesh, -1.0);

        assert_eq!(mesh.num_triangles(), 12);
        assert!(mesh.is_watertight());
    }
}
