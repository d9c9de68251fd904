use super::linear_interpolate;
use crate::constants::EARTH_RADIUS_M;
use dem::C;

/// Returns how far the earth's surface drops below a tangent plane
/// at `distance_m` from the point of tangency.
///
/// Equal to `sqrt(R² + d²) - R`, rearranged to avoid cancellation.
pub fn earth_curvature(distance_m: C) -> C {
    let r = EARTH_RADIUS_M;
    let d2 = distance_m * distance_m;
    d2 / ((r * r + d2).sqrt() + r)
}

/// Returns `elevations` lowered by the earth's curvature, measured
/// from the first sample.
///
/// `distances` holds each sample's cumulative distance from the
/// first.
pub fn apply_earth_curvature(elevations: &[C], distances: &[C]) -> Vec<C> {
    debug_assert_eq!(elevations.len(), distances.len());
    elevations
        .iter()
        .zip(distances)
        .map(|(elevation, distance)| elevation - earth_curvature(*distance))
        .collect()
}

/// Like [`apply_earth_curvature`], but tilted back so both endpoints
/// keep their original elevation.
///
/// Handy for plotting: the terrain bulges up between the endpoints
/// instead of falling away from the start.
pub fn level_earth_curvature(elevations: &[C], distances: &[C]) -> Vec<C> {
    let mut curved = apply_earth_curvature(elevations, distances);
    if let (Some(&total), Some(&raw_end), Some(&curved_end)) =
        (distances.last(), elevations.last(), curved.last())
    {
        if total > 0.0 {
            let end_shift = raw_end - curved_end;
            for (elevation, distance) in curved.iter_mut().zip(distances) {
                *elevation += linear_interpolate(0.0, total, 0.0, end_shift, *distance);
            }
        }
    }
    curved
}
