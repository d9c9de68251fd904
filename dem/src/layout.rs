use crate::{CellId, GeoTransform, ARCSEC_PER_DEG, C};
use geo::geometry::Coord;

/// Shape and georeferencing convention of a single cell's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Samples per degree along each axis.
    samples_per_degree: u16,

    /// SRTM style: samples are centered on the grid lines, so a cell
    /// carries one extra row and column that it shares with its
    /// neighbors.
    pixel_is_point: bool,
}

impl TileLayout {
    /// 1 arc-second, 3600x3600 samples covering exactly one cell.
    pub const ONE_ARCSECOND: Self = Self::new(3600, false);

    /// SRTM/NASADEM 1 arc-second `.hgt`, 3601x3601 samples.
    pub const HGT_1_ARCSECOND: Self = Self::new(3600, true);

    /// SRTM/NASADEM 3 arc-second `.hgt`, 1201x1201 samples.
    pub const HGT_3_ARCSECOND: Self = Self::new(1200, true);

    pub const fn new(samples_per_degree: u16, pixel_is_point: bool) -> Self {
        Self {
            samples_per_degree,
            pixel_is_point,
        }
    }

    /// Number of rows (and columns) in one cell's grid.
    pub fn dimension(&self) -> usize {
        usize::from(self.samples_per_degree) + usize::from(self.pixel_is_point)
    }

    /// Arcseconds per sample.
    pub fn arcseconds(&self) -> C {
        ARCSEC_PER_DEG / C::from(self.samples_per_degree)
    }

    /// Degrees per sample.
    pub fn pixel_size(&self) -> C {
        1.0 / C::from(self.samples_per_degree)
    }

    /// Transform placing pixel (0, 0) at `cell`'s northwest corner.
    pub fn transform(&self, cell: CellId) -> GeoTransform {
        let res = self.pixel_size();
        let shift = if self.pixel_is_point { res / 2.0 } else { 0.0 };
        let Coord { x, y } = cell.sw_corner();
        GeoTransform::new(
            Coord {
                x: x - shift,
                y: y + 1.0 + shift,
            },
            res,
            -res,
        )
    }
}
