use heightmesh::math::Real;
use heightmesh::{pipeline, Config, Grid};

#[test]
fn constant_grid() {
    let grid = Grid::constant(4, 4, 0.5).unwrap();
    let mesh = pipeline(&Config::default(), grid).unwrap();

    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_triangles(), 2);
    assert_eq!(mesh.achieved_error(), 0.0);
}

#[test]
fn planar_grid() {
    let grid = Grid::from_fn(3, 3, |x, _| x as Real * 0.5).unwrap();
    let mesh = pipeline(&Config::default(), grid).unwrap();

    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_triangles(), 2);
    assert_eq!(mesh.achieved_error(), 0.0);
}

#[test]
fn center_spike() {
    let grid = Grid::from_fn(8, 8, |x, y| if (x, y) == (4, 4) { 10.0 } else { 0.0 }).unwrap();
    let mesh = pipeline(&Config::default(), grid).unwrap();

    assert!(mesh.achieved_error() <= 0.001);
    assert!(mesh.num_vertices() >= 5);
    assert!(mesh
        .vertices()
        .iter()
        .any(|p| p.x == 4.0 && p.y == 4.0 && p.z == 10.0));
}

#[test]
fn flat_buffers() {
    let grid = Grid::constant(4, 4, 0.5).unwrap();
    let mesh = pipeline(&Config::default(), grid).unwrap();

    let vertices = mesh.vertex_buffer();
    let indices = mesh.index_buffer();

    assert_eq!(vertices.len(), 3 * mesh.num_vertices());
    assert_eq!(indices.len(), 3 * mesh.num_triangles());
    assert_eq!(&vertices[9..12], &[3.0, 3.0, 0.5]);
    assert_eq!(indices, vec![0, 1, 3, 0, 3, 2]);
}

#[test]
fn leveled_and_inverted_ramp() {
    let grid = Grid::from_fn(5, 5, |x, y| 3.0 * (x + y) as Real).unwrap();
    let config = Config {
        level: true,
        invert: true,
        ..Config::default()
    };
    let mesh = pipeline(&config, grid).unwrap();

    // Still a plane: the two corner triangles are exact.
    assert_eq!(mesh.num_triangles(), 2);
    assert_eq!(mesh.achieved_error(), 0.0);
    assert_eq!(mesh.vertices()[0].z, 1.0);
    assert_eq!(mesh.vertices()[3].z, 0.0);
}

#[test]
fn bordered_grid() {
    let grid = Grid::constant(4, 4, 0.5).unwrap();
    let config = Config {
        border_size: 2,
        border_height: 0.0,
        ..Config::default()
    };
    let mesh = pipeline(&config, grid).unwrap();

    let max_x = mesh.vertices().iter().fold(0.0, |acc: Real, p| acc.max(p.x));
    let max_y = mesh.vertices().iter().fold(0.0, |acc: Real, p| acc.max(p.y));
    assert_eq!((max_x, max_y), (7.0, 7.0));
    assert!(mesh.achieved_error() <= config.max_error);
    assert!(mesh.vertices().iter().any(|p| p.z == 0.5));
}
