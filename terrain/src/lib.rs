//! Terrain profiles over an on-demand mosaic of DEM cells.
//!
//! A [`TileManager`] owns a single merged raster ([`Mosaic`]) that
//! grows as queries touch new 1°x1° cells. Cells come from a
//! [`TileStore`]; [`TileDir`] serves `.hgt` files from a directory.

pub mod constants;
mod error;
mod manager;
pub mod math;
mod mosaic;
mod profile;
mod store;
mod tile_dir;

pub use crate::{
    error::TerrainError,
    manager::TileManager,
    mosaic::Mosaic,
    profile::Profile,
    store::TileStore,
    tile_dir::TileDir,
};
pub use dem::{self, geo, CellId, ElevationGrid, TileLayout};
