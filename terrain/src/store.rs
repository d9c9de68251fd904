use crate::TerrainError;
use dem::{CellId, ElevationGrid};
use std::sync::Arc;

/// A source of elevation grids, one 1°x1° cell at a time.
///
/// Implementations fetch, read, or synthesize as they see fit, but
/// must return a grid for every cell they are asked about. A cell
/// with no source data (open ocean, say) resolves to an all-zero
/// grid shaped like the store's other tiles rather than an error.
///
/// Stores are shared across the threads that fetch missing cells in
/// parallel, hence `Send + Sync`.
pub trait TileStore: Send + Sync {
    /// Returns the elevation grid covering `cell`.
    fn resolve_cell(&self, cell: CellId) -> Result<ElevationGrid, TerrainError>;
}

impl<T: TileStore + ?Sized> TileStore for &T {
    fn resolve_cell(&self, cell: CellId) -> Result<ElevationGrid, TerrainError> {
        (**self).resolve_cell(cell)
    }
}

impl<T: TileStore + ?Sized> TileStore for Arc<T> {
    fn resolve_cell(&self, cell: CellId) -> Result<ElevationGrid, TerrainError> {
        (**self).resolve_cell(cell)
    }
}

impl<T: TileStore + ?Sized> TileStore for Box<T> {
    fn resolve_cell(&self, cell: CellId) -> Result<ElevationGrid, TerrainError> {
        (**self).resolve_cell(cell)
    }
}
