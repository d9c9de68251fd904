use crate::TerrainError;
use dem::{CellId, Elev, ElevationGrid, C};
use geo::geometry::Coord;
use std::collections::BTreeSet;

/// A single raster merged from every cell loaded so far.
///
/// Cells are only ever added.
#[derive(Debug, Default)]
pub struct Mosaic {
    /// Merged grid, `None` until the first cell arrives.
    grid: Option<ElevationGrid>,

    /// Cells already merged into `grid`.
    cells: BTreeSet<CellId>,
}

impl Mosaic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_none()
    }

    pub fn grid(&self) -> Option<&ElevationGrid> {
        self.grid.as_ref()
    }

    pub fn cells(&self) -> &BTreeSet<CellId> {
        &self.cells
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns the cells in `wanted` not yet merged.
    pub fn missing<'a, I>(&self, wanted: I) -> BTreeSet<CellId>
    where
        I: IntoIterator<Item = &'a CellId>,
    {
        wanted
            .into_iter()
            .filter(|cell| !self.cells.contains(cell))
            .copied()
            .collect()
    }

    /// Merges `tiles` into the mosaic, skipping cells already present.
    ///
    /// The existing raster goes first so its pixels win wherever a
    /// new tile overlaps it. On error the mosaic is left untouched.
    pub fn extend<I>(&mut self, tiles: I) -> Result<(), TerrainError>
    where
        I: IntoIterator<Item = (CellId, ElevationGrid)>,
    {
        let mut fresh: Vec<(CellId, ElevationGrid)> = Vec::new();
        for (cell, grid) in tiles {
            if !self.cells.contains(&cell) && !fresh.iter().any(|(seen, _)| *seen == cell) {
                fresh.push((cell, grid));
            }
        }
        if fresh.is_empty() {
            return Ok(());
        }

        let merged = dem::merge(self.grid.iter().chain(fresh.iter().map(|(_, grid)| grid)))?;
        self.grid = Some(merged);
        self.cells.extend(fresh.into_iter().map(|(cell, _)| cell));
        Ok(())
    }

    /// Returns the sample under `coord`.
    pub fn elevation(&self, coord: Coord<C>) -> Result<Elev, TerrainError> {
        self.grid
            .as_ref()
            .and_then(|grid| grid.get(coord))
            .ok_or(TerrainError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{CellId, Mosaic, TerrainError};
    use dem::{ElevationGrid, TileLayout};
    use geo::geometry::Coord;

    const LAYOUT: TileLayout = TileLayout::new(10, false);

    fn tile(cell: CellId, value: i16) -> (CellId, ElevationGrid) {
        let dim = LAYOUT.dimension();
        (
            cell,
            ElevationGrid::filled(LAYOUT.transform(cell), (dim, dim), value),
        )
    }

    #[test]
    fn test_starts_empty() {
        let mosaic = Mosaic::new();
        assert!(mosaic.is_empty());
        assert!(mosaic.cells().is_empty());
        assert!(matches!(
            mosaic.elevation(Coord { x: 0.5, y: 0.5 }),
            Err(TerrainError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_grows_monotonically() {
        let mut mosaic = Mosaic::new();
        mosaic.extend([tile(CellId::new(10, 45), 5)]).unwrap();
        assert_eq!(mosaic.elevation(Coord { x: 10.5, y: 45.5 }).unwrap(), 5);

        mosaic.extend([tile(CellId::new(11, 46), 9)]).unwrap();
        assert_eq!(mosaic.cells().len(), 2);
        assert_eq!(mosaic.elevation(Coord { x: 10.5, y: 45.5 }).unwrap(), 5);
        assert_eq!(mosaic.elevation(Coord { x: 11.5, y: 46.5 }).unwrap(), 9);
        // Envelope gap is sea.
        assert_eq!(mosaic.elevation(Coord { x: 11.5, y: 45.5 }).unwrap(), 0);
        assert_eq!(mosaic.grid().unwrap().dimensions(), (20, 20));
    }

    #[test]
    fn test_loaded_cells_are_not_remerged() {
        let mut mosaic = Mosaic::new();
        mosaic.extend([tile(CellId::new(10, 45), 5)]).unwrap();
        mosaic
            .extend([tile(CellId::new(10, 45), 99), tile(CellId::new(10, 45), 98)])
            .unwrap();
        assert_eq!(mosaic.cells().len(), 1);
        assert_eq!(mosaic.elevation(Coord { x: 10.5, y: 45.5 }).unwrap(), 5);
    }

    #[test]
    fn test_missing() {
        let mut mosaic = Mosaic::new();
        mosaic.extend([tile(CellId::new(10, 45), 5)]).unwrap();
        let wanted = [CellId::new(10, 45), CellId::new(11, 45)];
        let missing = mosaic.missing(&wanted);
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec![CellId::new(11, 45)]);
    }

    #[test]
    fn test_failed_merge_leaves_mosaic_alone() {
        let mut mosaic = Mosaic::new();
        mosaic.extend([tile(CellId::new(10, 45), 5)]).unwrap();
        let odd_cell = CellId::new(11, 45);
        let odd = ElevationGrid::sea(odd_cell, TileLayout::new(20, false));
        assert!(mosaic.extend([(odd_cell, odd)]).is_err());
        assert!(!mosaic.contains(odd_cell));
        assert_eq!(mosaic.grid().unwrap().dimensions(), (10, 10));
    }
}
