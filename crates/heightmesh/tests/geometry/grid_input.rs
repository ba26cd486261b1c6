use heightmesh::math::Real;
use heightmesh::{pipeline, Config, Grid, InvalidInput};

#[test]
fn mismatched_lengths_are_rejected() {
    for (width, height, len) in [(3, 3, 8), (3, 3, 10), (1, 4, 0), (2, 5, 5)] {
        assert_eq!(
            Grid::new(width, height, vec![0.0; len]),
            Err(InvalidInput::DimensionMismatch { width, height, len })
        );
    }

    assert_eq!(
        Grid::new(0, 3, Vec::new()),
        Err(InvalidInput::EmptyGrid {
            width: 0,
            height: 3
        })
    );
}

#[test]
fn non_finite_elevations_are_rejected() {
    let mut values = vec![0.0; 6];
    values[4] = Real::INFINITY;

    assert_eq!(
        Grid::new(3, 2, values),
        Err(InvalidInput::NonFiniteElevation { index: 4 })
    );
}

#[test]
fn valid_grids_keep_their_samples() {
    let grid = Grid::from_fn(5, 3, |x, y| (10 * y + x) as Real).unwrap();

    assert_eq!(grid.len(), grid.width() * grid.height());
    assert_eq!(grid.values()[7], 12.0);
    assert_eq!(grid.get(2, 1), 12.0);
}

#[test]
fn border_ring() {
    let mut grid = Grid::from_fn(3, 2, |x, y| (x + y) as Real).unwrap();
    let original = grid.clone();
    grid.add_border(3, 7.0);

    assert_eq!(grid.width(), 3 + 2 * 3);
    assert_eq!(grid.height(), 2 + 2 * 3);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let inside = (3..6).contains(&x) && (3..5).contains(&y);

            if inside {
                assert_eq!(grid.get(x, y), original.get(x - 3, y - 3));
            } else {
                assert_eq!(grid.get(x, y), 7.0);
            }
        }
    }
}

#[test]
fn invalid_config_stops_the_pipeline() {
    let grid = Grid::constant(3, 3, 1.0).unwrap();
    let config = Config {
        z_scale: Real::NAN,
        ..Config::default()
    };

    assert!(matches!(
        pipeline(&config, grid),
        Err(InvalidInput::InvalidParameter { name: "z_scale", .. })
    ));
}
