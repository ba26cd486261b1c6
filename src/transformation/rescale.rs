use crate::math::{Point, Real};

/// Linearly maps the grid coordinates of `vertices` onto a geographic extent.
///
/// `bounds` is `[min_x, min_y, max_x, max_y]`. The tile size is the largest
/// `x` or `y` coordinate among the vertices, so a square tile exactly covers
/// the extent. With `flip_y`, `y = 0` maps to `max_y`, which matches images
/// whose origin is their top-left corner. The `z` coordinates are unchanged.
pub fn rescale_positions(
    vertices: &[Point<Real>],
    bounds: [Real; 4],
    flip_y: bool,
) -> Vec<Point<Real>> {
    let tile_size = vertices
        .iter()
        .fold(0.0, |acc: Real, p| acc.max(p.x).max(p.y));
    let tile_size = if tile_size > 0.0 { tile_size } else { 1.0 };

    let [min_x, min_y, max_x, max_y] = bounds;
    let x_scale = (max_x - min_x) / tile_size;
    let y_scale = (max_y - min_y) / tile_size;

    let (y_scale, y_offset) = if flip_y {
        (-y_scale, max_y)
    } else {
        (y_scale, min_y)
    };

    vertices
        .iter()
        .map(|p| Point::new(p.x * x_scale + min_x, p.y * y_scale + y_offset, p.z))
        .collect()
}

/// The factor by which elevations must be scaled at latitude `lat` (in
/// degrees) to stay consistent with web-mercator horizontal distances.
#[inline]
pub fn latitude_adjustment(lat: Real) -> Real {
    lat.to_radians().cos()
}
