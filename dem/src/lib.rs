//! Elevation tiles for 1°x1° DEM cells.
//!
//! This crate knows how to address a cell, how to describe the
//! georeferencing of a grid of samples, how to paste several grids
//! into one mosaic, and how to read SRTM/NASADEM `.hgt` files from
//! disk.
//!
//! # References
//!
//! 1. [30-Meter SRTM Tile Downloader](https://dwtkns.com/srtm30m)
//! 1. [Archive Team](http://fileformats.archiveteam.org/index.php?title=HGT&oldid=17250)
//! 1. [SRTM Collection User Guide](https://lpdaac.usgs.gov/documents/179/SRTM_User_Guide_V3.pdf)
//! 1. [Copernicus DEM product handbook](https://spacedata.copernicus.eu/documents/20123/121239/GEO1988-CopernicusDEM-SPE-002_ProductHandbook_I4.0.pdf)

mod cell;
mod error;
mod grid;
pub mod hgt;
mod layout;
mod merge;
mod transform;

pub use crate::{
    cell::CellId, error::DemError, grid::ElevationGrid, layout::TileLayout, merge::merge,
    transform::GeoTransform,
};
pub use geo;

/// Base floating point type used for all coordinates and calculations.
pub type C = f64;

/// Bit representation of elevation samples.
pub type Elev = i16;

const ARCSEC_PER_DEG: C = 3600.0;
