use heightmesh::math::Real;
use heightmesh::{pipeline, Config, Grid};

fn spike() -> Grid {
    Grid::from_fn(8, 8, |x, y| if (x, y) == (4, 4) { 10.0 } else { 0.0 }).unwrap()
}

fn check_base(grid: Grid, config: Config) {
    let surface = pipeline(
        &Config {
            base_height: 0.0,
            ..config
        },
        grid.clone(),
    )
    .unwrap();
    let solid = pipeline(&config, grid).unwrap();

    let num_top = surface.num_vertices() as u32;
    let loop_len = surface.boundary_loop().len();
    let bottom_z = -config.base_height * config.z_factor();

    assert_eq!(&solid.vertices()[..num_top as usize], surface.vertices());
    assert_eq!(&solid.indices()[..surface.num_triangles()], surface.indices());
    assert_eq!(solid.num_vertices(), num_top as usize + loop_len);
    assert!(solid.vertices()[num_top as usize..]
        .iter()
        .all(|p| p.z == bottom_z));

    let skirt = solid
        .indices()
        .iter()
        .filter(|t| t.iter().any(|i| *i < num_top) && t.iter().any(|i| *i >= num_top))
        .count();
    let cap = solid
        .indices()
        .iter()
        .filter(|t| t.iter().all(|i| *i >= num_top))
        .count();

    assert_eq!(skirt, 2 * loop_len);
    assert_eq!(cap, loop_len - 2);
    assert_eq!(
        solid.num_triangles(),
        surface.num_triangles() + 3 * loop_len - 2
    );
    assert!(solid.is_watertight());
}

#[test]
fn base_under_a_spike() {
    let config = Config {
        base_height: 2.0,
        ..Config::default()
    };
    check_base(spike(), config);
}

#[test]
fn base_under_a_scaled_spike() {
    let config = Config {
        base_height: 1.5,
        z_scale: 0.5,
        z_exaggeration: 3.0,
        ..Config::default()
    };
    check_base(spike(), config);
}

#[test]
fn base_under_noise() {
    let mut rng = oorandom::Rand32::new(5);
    let grid = Grid::from_fn(17, 13, |_, _| rng.rand_float() as Real).unwrap();

    for max_points in [0, 12] {
        let config = Config {
            max_error: 0.0,
            max_points,
            base_height: 1.0,
            ..Config::default()
        };
        check_base(grid.clone(), config);
    }
}

#[test]
fn base_under_degenerate_strips() {
    for (width, height) in [(1, 6), (6, 1), (1, 1)] {
        let grid = Grid::from_fn(width, height, |x, y| (x + y) as Real).unwrap();
        let config = Config {
            base_height: 2.0,
            ..Config::default()
        };
        let mesh = pipeline(&config, grid).unwrap();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.achieved_error(), 0.0);
        assert!(mesh.is_watertight());
    }
}
