/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Default distance between profile samples, roughly one
/// arc-second of DEM at mid latitudes.
pub const DEFAULT_STEP_SIZE_M: f64 = 30.0;
