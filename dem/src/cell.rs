use crate::C;
use geo::geometry::Coord;
use std::fmt;

/// A 1°x1° DEM cell, identified by its southwest corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    /// Longitude of the western edge, in whole degrees.
    pub lon: i16,
    /// Latitude of the southern edge, in whole degrees.
    pub lat: i16,
}

impl CellId {
    pub const fn new(lon: i16, lat: i16) -> Self {
        Self { lon, lat }
    }

    /// Returns the cell containing `coord`.
    ///
    /// Coordinates sitting exactly on an integer degree belong to the
    /// cell to their north/east.
    pub fn containing(Coord { x, y }: Coord<C>) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self {
            lon: x.floor() as i16,
            lat: y.floor() as i16,
        }
    }

    /// Returns every cell whose grid may hold the sample under `coord`.
    ///
    /// This is [`containing`](Self::containing), plus the cell to the
    /// south when `coord` sits on an integer latitude: in pixel-is-area
    /// layouts that row belongs to the southern cell's top edge.
    pub fn touching(coord: Coord<C>) -> impl Iterator<Item = Self> {
        let cell = Self::containing(coord);
        let on_edge = coord.y - coord.y.floor() < 1e-9;
        std::iter::once(cell).chain(on_edge.then(|| Self::new(cell.lon, cell.lat - 1)))
    }

    /// Southwest corner in degrees.
    pub fn sw_corner(&self) -> Coord<C> {
        Coord {
            x: C::from(self.lon),
            y: C::from(self.lat),
        }
    }

    /// File stem used by tile archives, e.g. `N44_00_W072_00`.
    pub fn stem(&self) -> String {
        let (n_s, lat, e_w, lon) = self.hemispheres();
        format!("{n_s}{lat:02}_00_{e_w}{lon:03}_00")
    }

    /// File name of the matching SRTM height file, e.g. `N44W072.hgt`.
    pub fn hgt_name(&self) -> String {
        let (n_s, lat, e_w, lon) = self.hemispheres();
        format!("{n_s}{lat:02}{e_w}{lon:03}.hgt")
    }

    fn hemispheres(&self) -> (char, u16, char, u16) {
        let n_s = if self.lat.is_negative() { 'S' } else { 'N' };
        let e_w = if self.lon.is_negative() { 'W' } else { 'E' };
        (n_s, self.lat.unsigned_abs(), e_w, self.lon.unsigned_abs())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

#[cfg(test)]
mod tests {
    use super::{CellId, Coord};

    const MT_WASHINGTON: Coord = Coord {
        y: 44.2705,
        x: -71.30325,
    };

    #[test]
    fn test_containing() {
        assert_eq!(CellId::containing(MT_WASHINGTON), CellId::new(-72, 44));
        assert_eq!(
            CellId::containing(Coord { x: 10.0, y: 45.0 }),
            CellId::new(10, 45)
        );
    }

    #[test]
    fn test_touching() {
        let cells: Vec<CellId> = CellId::touching(MT_WASHINGTON).collect();
        assert_eq!(cells, vec![CellId::new(-72, 44)]);

        let cells: Vec<CellId> = CellId::touching(Coord { x: 10.2, y: 45.0 }).collect();
        assert_eq!(cells, vec![CellId::new(10, 45), CellId::new(10, 44)]);

        let cells: Vec<CellId> = CellId::touching(Coord { x: -0.5, y: 0.0 }).collect();
        assert_eq!(cells, vec![CellId::new(-1, 0), CellId::new(-1, -1)]);
    }

    #[test]
    fn test_names_around_origin() {
        let cell = CellId::containing(Coord {
            y: 0.0 + f64::EPSILON,
            x: 0.0 + f64::EPSILON,
        });
        assert_eq!(cell.hgt_name(), "N00E000.hgt");
        assert_eq!(cell.stem(), "N00_00_E000_00");

        let cell = CellId::containing(Coord {
            y: 0.0 + f64::EPSILON,
            x: 0.0 - f64::EPSILON,
        });
        assert_eq!(cell.hgt_name(), "N00W001.hgt");

        let cell = CellId::containing(Coord {
            y: 0.0 - f64::EPSILON,
            x: 0.0 - f64::EPSILON,
        });
        assert_eq!(cell.hgt_name(), "S01W001.hgt");
        assert_eq!(cell.stem(), "S01_00_W001_00");

        let cell = CellId::containing(Coord {
            y: 0.0 - f64::EPSILON,
            x: 0.0 + f64::EPSILON,
        });
        assert_eq!(cell.hgt_name(), "S01E000.hgt");
    }

    #[test]
    fn test_display_is_stem() {
        let cell = CellId::containing(MT_WASHINGTON);
        assert_eq!(cell.to_string(), "N44_00_W072_00");
    }
}
