use crate::{fresnel::FresnelZone, LosError};
use geo::geometry::{Coord, Point};
use log::debug;
use terrain::{
    dem::C,
    math::{apply_earth_curvature, linear_interpolate},
    Profile, TileManager, TileStore,
};

/// Antenna height above ground used when none is given, in meters.
pub const DEFAULT_ANTENNA_HEIGHT_M: C = 2.0;

/// Vertical uncertainty subtracted from every DEM sample, in meters.
pub const DEFAULT_RMSE_M: C = 5.0;

/// The first profile sample found poking through the direct path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstruction {
    /// Index into the profile.
    pub index: usize,

    /// Distance from the transmitter in meters.
    pub distance_m: C,

    /// How far the sample, less the RMSE margin, rises above the
    /// direct path. Always positive.
    pub excess_m: C,
}

/// Returns the first intermediate sample of a curvature-corrected
/// profile that rises above the direct path, or `None` if the path
/// is clear.
///
/// The path runs from `corrected[0] + tx_height_m` at the first
/// distance to `corrected[last] + rx_height_m` at the last. A sample
/// obstructs when `corrected[i] - rmse_m` is strictly above it.
///
/// `distances` and `corrected` must have equal lengths, and the first
/// and last distances must differ.
pub fn first_obstruction(
    distances: &[C],
    corrected: &[C],
    tx_height_m: C,
    rx_height_m: C,
    rmse_m: C,
) -> Option<Obstruction> {
    debug_assert_eq!(distances.len(), corrected.len());
    let (&d_start, &d_end) = (distances.first()?, distances.last()?);
    let (&e_start, &e_end) = (corrected.first()?, corrected.last()?);
    let (tx, rx) = (e_start + tx_height_m, e_end + rx_height_m);

    let inner = distances.len().min(corrected.len()).saturating_sub(1);
    (1..inner).find_map(|index| {
        let distance_m = distances[index];
        let path_m = linear_interpolate(d_start, d_end, tx, rx, distance_m);
        let excess_m = corrected[index] - rmse_m - path_m;
        (excess_m > 0.0).then_some(Obstruction {
            index,
            distance_m,
            excess_m,
        })
    })
}

/// Returns `true` if the direct path from `start` to `end` clears the
/// terrain.
///
/// Antenna heights are above ground at each end. See
/// [`first_obstruction`] for the clearance rule.
pub fn is_visible<S: TileStore>(
    start: Coord<C>,
    end: Coord<C>,
    tiles: &TileManager<S>,
    tx_height_m: C,
    rx_height_m: C,
    rmse_m: C,
) -> Result<bool, LosError> {
    let profile = tiles.profile(start, end)?;
    let corrected = profile.curved_terrain();
    let obstruction = first_obstruction(
        &profile.distances_m,
        &corrected,
        tx_height_m,
        rx_height_m,
        rmse_m,
    );
    if let Some(Obstruction { distance_m, .. }) = obstruction {
        debug!("{start:?} -> {end:?} obstructed at {distance_m:.0} m");
    }
    Ok(obstruction.is_none())
}

/// Line of sight analysis of a single path.
#[derive(Debug, Clone)]
pub struct LineOfSight {
    /// Cumulative distance of each sample from the start.
    pub distances_m: Vec<C>,

    /// Location of each sample.
    pub points: Vec<Point<C>>,

    /// Terrain elevation at each sample.
    pub terrain_elev_m: Vec<C>,

    /// `terrain_elev_m` lowered by the earth's curvature as seen from
    /// the start.
    pub corrected_elev_m: Vec<C>,

    /// Height of the direct path at each sample.
    pub los_elev_m: Vec<C>,

    /// First sample blocking the path, if any.
    pub obstruction: Option<Obstruction>,
}

impl LineOfSight {
    pub fn builder() -> LineOfSightBuilder {
        LineOfSightBuilder {
            start: None,
            end: None,
            tx_height_m: DEFAULT_ANTENNA_HEIGHT_M,
            rx_height_m: DEFAULT_ANTENNA_HEIGHT_M,
            rmse_m: DEFAULT_RMSE_M,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.obstruction.is_none()
    }

    /// Total path length in meters.
    pub fn distance(&self) -> C {
        self.distances_m.last().copied().unwrap_or_default()
    }

    /// Radius of the first Fresnel zone at each sample, for a signal
    /// at `f_hz`.
    pub fn fresnel_zone_m(&self, f_hz: C) -> Vec<C> {
        let zone = FresnelZone::new(1, f_hz, self.distance());
        self.distances_m
            .iter()
            .map(|&d1| zone.radius_at(d1))
            .collect()
    }
}

pub struct LineOfSightBuilder {
    /// Transmitter location (required).
    start: Option<Coord<C>>,

    /// Receiver location (required).
    end: Option<Coord<C>>,

    /// Transmitter height above ground (meters, defaults to 2).
    tx_height_m: C,

    /// Receiver height above ground (meters, defaults to 2).
    rx_height_m: C,

    /// DEM vertical uncertainty (meters, defaults to 5).
    rmse_m: C,
}

impl LineOfSightBuilder {
    /// Transmitter location (required).
    #[must_use]
    pub fn start(mut self, coord: Coord<C>) -> Self {
        self.start = Some(coord);
        self
    }

    /// Receiver location (required).
    #[must_use]
    pub fn end(mut self, coord: Coord<C>) -> Self {
        self.end = Some(coord);
        self
    }

    /// Transmitter height above ground (meters, defaults to 2).
    #[must_use]
    pub fn tx_height(mut self, meters: C) -> Self {
        self.tx_height_m = meters;
        self
    }

    /// Receiver height above ground (meters, defaults to 2).
    #[must_use]
    pub fn rx_height(mut self, meters: C) -> Self {
        self.rx_height_m = meters;
        self
    }

    /// DEM vertical uncertainty (meters, defaults to 5).
    #[must_use]
    pub fn rmse(mut self, meters: C) -> Self {
        self.rmse_m = meters;
        self
    }

    pub fn build<S: TileStore>(&self, tiles: &TileManager<S>) -> Result<LineOfSight, LosError> {
        let start = self.start.ok_or(LosError::Builder("start"))?;
        let end = self.end.ok_or(LosError::Builder("end"))?;

        let Profile {
            distance,
            distances_m,
            points,
            terrain_elev_m,
        } = tiles.profile(start, end)?;

        let corrected_elev_m = apply_earth_curvature(&terrain_elev_m, &distances_m);
        let obstruction = first_obstruction(
            &distances_m,
            &corrected_elev_m,
            self.tx_height_m,
            self.rx_height_m,
            self.rmse_m,
        );

        // Profiles always hold at least two samples.
        let (tx, rx) = (
            corrected_elev_m[0] + self.tx_height_m,
            corrected_elev_m[corrected_elev_m.len() - 1] + self.rx_height_m,
        );
        let los_elev_m = distances_m
            .iter()
            .map(|&d| linear_interpolate(0.0, distance, tx, rx, d))
            .collect();

        Ok(LineOfSight {
            distances_m,
            points,
            terrain_elev_m,
            corrected_elev_m,
            los_elev_m,
            obstruction,
        })
    }
}
