use heightmesh::math::Real;
use heightmesh::transformation::Triangulator;
use heightmesh::{pipeline, Config, Grid};

fn noise(width: usize, height: usize, seed: u64) -> Grid {
    let mut rng = oorandom::Rand32::new(seed);
    Grid::from_fn(width, height, |_, _| rng.rand_float() as Real).unwrap()
}

#[test]
fn unbounded_refinement_exhausts_the_samples() {
    let mut tri = Triangulator::new(noise(9, 9, 42));
    tri.run(0.0, 0, 0);

    assert_eq!(tri.error(), 0.0);
    assert_eq!(tri.rms_deviation(), 0.0);
    assert_eq!(tri.num_points(), 81);
    assert_eq!(tri.num_triangles(), 128);
    assert!(!tri.refine());
}

#[test]
fn point_budget() {
    let config = Config {
        max_error: 0.0,
        max_points: 10,
        ..Config::default()
    };
    let mesh = pipeline(&config, noise(16, 16, 1)).unwrap();

    assert_eq!(mesh.num_vertices(), 10);
    assert!(mesh.achieved_error() > 0.0);
}

#[test]
fn triangle_budget() {
    let config = Config {
        max_error: 0.0,
        max_triangles: 20,
        ..Config::default()
    };
    let mesh = pipeline(&config, noise(16, 16, 2)).unwrap();

    // One insertion adds one or two triangles.
    assert!((20..=21).contains(&mesh.num_triangles()));
}

#[test]
fn deterministic_output() {
    let config = Config {
        max_error: 0.05,
        blur_sigma: 0.8,
        base_height: 0.5,
        ..Config::default()
    };

    let first = pipeline(&config, noise(20, 14, 7)).unwrap();
    let second = pipeline(&config, noise(20, 14, 7)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn refinement_converges_monotonically() {
    let spike = Grid::from_fn(8, 8, |x, y| if (x, y) == (3, 3) { 10.0 } else { 0.0 }).unwrap();
    let bowl = Grid::from_fn(12, 12, |x, y| {
        let (dx, dy) = (x as Real - 6.0, y as Real - 5.0);
        dx * dx + dy * dy
    })
    .unwrap();

    for grid in [spike, bowl] {
        let mut tri = Triangulator::new(grid);

        while tri.error() > 0.001 {
            let (error, points, triangles) = (tri.error(), tri.num_points(), tri.num_triangles());

            assert!(tri.refine());
            assert!(tri.error() <= error);
            assert_eq!(tri.num_points(), points + 1);
            assert!(tri.num_triangles() > triangles);
        }
    }
}
