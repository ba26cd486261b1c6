//! Exact orientation and in-circle predicates on integer grid coordinates.

use crate::math::GridPoint;

/// Twice the signed area of the triangle `a, b, c`.
///
/// The result is positive if the triangle is counter-clockwise, negative if it
/// is clockwise, and zero if the three points are collinear.
///
/// Counter-clockwise example:
///
/// ```text
///          o c
///        .  .
///      .     .
///  a o . . . . o b
/// ```
#[inline]
pub fn orient2d(a: &GridPoint, b: &GridPoint, c: &GridPoint) -> i64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns `true` if `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `a, b, c`.
///
/// Points exactly on the circle are reported as outside. The determinant is
/// evaluated with 128-bit integers so the test is exact for any grid that
/// fits in memory.
#[inline]
pub fn in_circle(a: &GridPoint, b: &GridPoint, c: &GridPoint, d: &GridPoint) -> bool {
    let adx = (a.x - d.x) as i128;
    let ady = (a.y - d.y) as i128;
    let bdx = (b.x - d.x) as i128;
    let bdy = (b.y - d.y) as i128;
    let cdx = (c.x - d.x) as i128;
    let cdy = (c.y - d.y) as i128;

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    let det = adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx)
        + ad * (bdx * cdy - bdy * cdx);

    det > 0
}
