use crate::math::apply_earth_curvature;
use dem::C;
use geo::geometry::Point;

/// Terrain elevation sampled at regular intervals between two points.
///
/// All vectors are index-aligned and hold at least two entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Total geodesic distance from start to end in meters.
    pub distance: C,

    /// Cumulative distance of each sample from the start, 0 through
    /// `distance`.
    pub distances_m: Vec<C>,

    /// Location of each sample.
    pub points: Vec<Point<C>>,

    /// Terrain elevation at each sample.
    pub terrain_elev_m: Vec<C>,
}

impl Profile {
    /// Number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.distances_m.len()
    }

    /// Terrain elevations dropped by the earth's curvature as seen
    /// from the start point.
    pub fn curved_terrain(&self) -> Vec<C> {
        apply_earth_curvature(&self.terrain_elev_m, &self.distances_m)
    }
}
