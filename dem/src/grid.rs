use crate::{CellId, DemError, Elev, GeoTransform, TileLayout, C};
use geo::geometry::{Coord, Rect};
use std::fmt;

/// A georeferenced, row-major grid of elevation samples in meters.
///
/// Row 0 is the northernmost row. The CRS is always WGS84
/// geographic.
#[derive(Clone, PartialEq)]
pub struct ElevationGrid {
    /// Pixel to lon/lat mapping.
    transform: GeoTransform,

    /// Number of (rows, columns) in this grid.
    dimensions: (usize, usize),

    /// Elevation samples.
    samples: Box<[Elev]>,
}

impl ElevationGrid {
    /// Returns a grid over `samples`, which must hold exactly
    /// `rows * cols` values.
    pub fn new(
        transform: GeoTransform,
        dimensions @ (rows, cols): (usize, usize),
        samples: Vec<Elev>,
    ) -> Result<Self, DemError> {
        let expected = rows * cols;
        if samples.len() != expected {
            return Err(DemError::Dimensions {
                rows,
                cols,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            transform,
            dimensions,
            samples: samples.into_boxed_slice(),
        })
    }

    /// Returns a grid with every sample set to `value`.
    pub fn filled(transform: GeoTransform, dimensions @ (rows, cols): (usize, usize), value: Elev) -> Self {
        Self {
            transform,
            dimensions,
            samples: vec![value; rows * cols].into_boxed_slice(),
        }
    }

    /// Returns an all-zero grid for `cell`.
    ///
    /// Stand-in for cells with no source data, typically open ocean.
    pub fn sea(cell: CellId, layout: TileLayout) -> Self {
        let dim = layout.dimension();
        Self::filled(layout.transform(cell), (dim, dim), 0)
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Number of (rows, columns).
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    pub fn samples(&self) -> &[Elev] {
        &self.samples
    }

    /// Number of samples in this grid.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Geographic extent covered by this grid's pixels.
    pub fn bounds(&self) -> Rect<C> {
        let (rows, cols) = self.dimensions;
        let GeoTransform {
            origin,
            pixel_width,
            pixel_height,
        } = self.transform;
        #[allow(clippy::cast_precision_loss)]
        let far = Coord {
            x: origin.x + cols as C * pixel_width,
            y: origin.y + rows as C * pixel_height,
        };
        Rect::new(origin, far)
    }

    /// Returns the (row, col) of the pixel containing `coord`, if it
    /// lies within this grid.
    pub fn pixel(&self, coord: Coord<C>) -> Option<(usize, usize)> {
        let (row, col) = self.transform.rowcol(coord);
        let (rows, cols) = self.dimensions;
        let row = usize::try_from(row).ok().filter(|row| *row < rows)?;
        let col = usize::try_from(col).ok().filter(|col| *col < cols)?;
        Some((row, col))
    }

    /// Returns the sample at `coord`, if it lies within this grid.
    pub fn get(&self, coord: Coord<C>) -> Option<Elev> {
        self.pixel(coord).map(|rc| self.get_rowcol(rc))
    }

    /// Returns the sample at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn get_rowcol(&self, (row, col): (usize, usize)) -> Elev {
        self.samples[self.rowcol_to_linear((row, col))]
    }

    /// Lowest and highest sample in this grid.
    pub fn min_max(&self) -> Option<(Elev, Elev)> {
        let min = self.samples.iter().min().copied()?;
        let max = self.samples.iter().max().copied()?;
        Some((min, max))
    }

    /// Iterator over the rows of this grid, north to south.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Elev]> + '_ {
        self.samples.chunks_exact(self.dimensions.1)
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [Elev] {
        &mut self.samples
    }

    fn rowcol_to_linear(&self, (row, col): (usize, usize)) -> usize {
        assert!(col < self.dimensions.1, "column {col} out of range");
        row * self.dimensions.1 + col
    }
}

impl fmt::Debug for ElevationGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevationGrid")
            .field("transform", &self.transform)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{CellId, Coord, DemError, ElevationGrid, GeoTransform, TileLayout};
    use approx::assert_relative_eq;

    fn tiny() -> ElevationGrid {
        // 2x3 grid, one degree per pixel, NW corner at (0, 2).
        let tf = GeoTransform::new(Coord { x: 0.0, y: 2.0 }, 1.0, -1.0);
        ElevationGrid::new(tf, (2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_len() {
        let tf = GeoTransform::new(Coord { x: 0.0, y: 2.0 }, 1.0, -1.0);
        let err = ElevationGrid::new(tf, (2, 3), vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            DemError::Dimensions {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_get() {
        let grid = tiny();
        assert_eq!(grid.get(Coord { x: 0.5, y: 1.5 }), Some(1));
        assert_eq!(grid.get(Coord { x: 2.5, y: 1.5 }), Some(3));
        assert_eq!(grid.get(Coord { x: 1.5, y: 0.5 }), Some(5));
        assert_eq!(grid.get(Coord { x: 3.5, y: 0.5 }), None);
        assert_eq!(grid.get(Coord { x: 0.5, y: -0.5 }), None);
        assert_eq!(grid.get(Coord { x: -0.5, y: 0.5 }), None);
    }

    #[test]
    fn test_bounds() {
        let bounds = tiny().bounds();
        assert_relative_eq!(bounds.min().x, 0.0);
        assert_relative_eq!(bounds.min().y, 0.0);
        assert_relative_eq!(bounds.max().x, 3.0);
        assert_relative_eq!(bounds.max().y, 2.0);
    }

    #[test]
    fn test_sea_tile() {
        let cell = CellId::new(-30, 40);
        let sea = ElevationGrid::sea(cell, TileLayout::HGT_3_ARCSECOND);
        assert_eq!(sea.dimensions(), (1201, 1201));
        assert_eq!(sea.min_max(), Some((0, 0)));
        assert_eq!(sea.get(Coord { x: -29.5, y: 40.5 }), Some(0));
    }
}
