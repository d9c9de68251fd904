use dem::{CellId, DemError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("invalid path geometry: {0}")]
    Geometry(String),

    #[error("tile {cell} unavailable: {reason}")]
    TileUnavailable { cell: CellId, reason: String },

    #[error("({x}, {y}) is outside the loaded mosaic")]
    OutOfBounds { x: f64, y: f64 },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("no height files in {0}")]
    Path(PathBuf),

    #[error("{0}")]
    Dem(#[from] DemError),

    #[error("tile mosaic lock was poisoned")]
    Poisoned,
}
