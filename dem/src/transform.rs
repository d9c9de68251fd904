use crate::C;
use geo::geometry::Coord;

/// North-up affine transform from pixel (row, col) to lon/lat.
///
/// The top-left corner of pixel `(row, col)` sits at
/// `origin + (col * pixel_width, row * pixel_height)`. `pixel_height`
/// is negative since rows run north to south.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// Top-left corner of the top-left pixel.
    pub origin: Coord<C>,
    /// Degrees of longitude per column.
    pub pixel_width: C,
    /// Degrees of latitude per row (negative).
    pub pixel_height: C,
}

impl GeoTransform {
    pub fn new(origin: Coord<C>, pixel_width: C, pixel_height: C) -> Self {
        Self {
            origin,
            pixel_width,
            pixel_height,
        }
    }

    /// Returns the (row, col) of the pixel containing `coord`.
    ///
    /// Indices are floored and may be negative or past the end of any
    /// particular grid; bounds checking is the caller's job.
    pub fn rowcol(&self, Coord { x, y }: Coord<C>) -> (isize, isize) {
        #[allow(clippy::cast_possible_truncation)]
        let row = ((y - self.origin.y) / self.pixel_height).floor() as isize;
        #[allow(clippy::cast_possible_truncation)]
        let col = ((x - self.origin.x) / self.pixel_width).floor() as isize;
        (row, col)
    }

    /// Returns the center of pixel `(row, col)`.
    pub fn pixel_center(&self, (row, col): (usize, usize)) -> Coord<C> {
        #[allow(clippy::cast_precision_loss)]
        Coord {
            x: self.origin.x + (col as C + 0.5) * self.pixel_width,
            y: self.origin.y + (row as C + 0.5) * self.pixel_height,
        }
    }

    /// Returns the (row, col) offset of `other`'s origin within this
    /// transform's pixel grid, or `None` if it falls between pixels.
    pub(crate) fn offset_of(&self, other: &Self) -> Option<(isize, isize)> {
        const TOLERANCE: C = 1e-6;
        let row = (other.origin.y - self.origin.y) / self.pixel_height;
        let col = (other.origin.x - self.origin.x) / self.pixel_width;
        if (row - row.round()).abs() > TOLERANCE || (col - col.round()).abs() > TOLERANCE {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        Some((row.round() as isize, col.round() as isize))
    }

    /// Whether `other` uses the same pixel size.
    pub(crate) fn same_resolution(&self, other: &Self) -> bool {
        let tolerance = self.pixel_width.abs() * 1e-9;
        (self.pixel_width - other.pixel_width).abs() <= tolerance
            && (self.pixel_height - other.pixel_height).abs() <= tolerance
    }
}
