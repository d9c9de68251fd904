use dem::C;
use geo::{
    geometry::{Coord, Line, Point},
    GeodesicDistance, LineInterpolatePoint,
};
use num_traits::Float;

/// Returns the straight path from `start` to `end`.
///
/// Points along the path are interpolated linearly in lon/lat, not
/// along the great circle.
pub fn line(start: Coord<C>, end: Coord<C>) -> Line<C> {
    Line::new(start, end)
}

/// Returns the WGS84 ellipsoidal distance, in meters, between the
/// endpoints of `line`.
///
/// `None` means the distance is unknown and must not be mistaken for
/// a zero-length path.
pub fn line_distance(line: &Line<C>) -> Option<C> {
    let distance = line.start_point().geodesic_distance(&line.end_point());
    (distance.is_finite() && distance >= 0.0).then_some(distance)
}

/// Returns `n + 1` points evenly spaced (by fraction, not by
/// distance) along `line`, both endpoints included.
///
/// The endpoints are copied rather than interpolated, so the first
/// and last points equal `line.start` and `line.end` exactly.
pub fn interpolate_points(line: &Line<C>, n: usize) -> Option<Vec<Point<C>>> {
    #[allow(clippy::cast_precision_loss)]
    let n_f = n as C;
    (0..=n)
        .map(|i| match i {
            0 => Some(line.start_point()),
            i if i == n => Some(line.end_point()),
            i => {
                #[allow(clippy::cast_precision_loss)]
                let fraction = i as C / n_f;
                line.line_interpolate_point(fraction)
            }
        })
        .collect()
}

/// Returns the value at `x` on the line through `(x1, y1)` and
/// `(x2, y2)`.
///
/// `x1` must differ from `x2`. Evaluating at `x1` or `x2` returns
/// `y1` or `y2` exactly.
pub fn linear_interpolate<T: Float>(x1: T, x2: T, y1: T, y2: T, x: T) -> T {
    let t = (x - x1) / (x2 - x1);
    y1 * (T::one() - t) + y2 * t
}
