use crate::{DemError, ElevationGrid, GeoTransform};
use geo::geometry::Coord;
use log::debug;

/// Pastes `grids` into a single grid covering their bounding envelope.
///
/// All inputs must share one pixel size and be aligned to a common
/// pixel grid. Pixels not covered by any input are 0. Where inputs
/// overlap, the earliest input wins.
pub fn merge<'a, I>(grids: I) -> Result<ElevationGrid, DemError>
where
    I: IntoIterator<Item = &'a ElevationGrid>,
{
    let grids: Vec<&ElevationGrid> = grids.into_iter().collect();
    let first = grids.first().ok_or(DemError::EmptyMerge)?.transform();

    if let Some(odd) = grids
        .iter()
        .map(|grid| grid.transform())
        .find(|tf| !first.same_resolution(tf))
    {
        return Err(DemError::ResolutionMismatch {
            expected: (first.pixel_width, first.pixel_height),
            actual: (odd.pixel_width, odd.pixel_height),
        });
    }

    let (west, north) = grids.iter().map(|grid| grid.transform().origin).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(west, north), Coord { x, y }| (west.min(x), north.max(y)),
    );
    let transform = GeoTransform::new(
        Coord { x: west, y: north },
        first.pixel_width,
        first.pixel_height,
    );

    let mut placements = Vec::with_capacity(grids.len());
    for grid in &grids {
        let origin = grid.transform().origin;
        let (row, col) = transform
            .offset_of(grid.transform())
            .ok_or(DemError::Misaligned((origin.x, origin.y)))?;
        // The envelope origin is the NW-most corner, so offsets are
        // never negative.
        #[allow(clippy::cast_sign_loss)]
        placements.push((*grid, (row as usize, col as usize)));
    }

    let dimensions @ (_, cols) = placements.iter().fold(
        (0_usize, 0_usize),
        |(rows, cols), (grid, (row_off, col_off))| {
            let (grid_rows, grid_cols) = grid.dimensions();
            (rows.max(row_off + grid_rows), cols.max(col_off + grid_cols))
        },
    );

    let mut merged = ElevationGrid::filled(transform, dimensions, 0);
    {
        let dst = merged.samples_mut();
        // Paint back to front so earlier inputs end up on top.
        for (grid, (row_off, col_off)) in placements.iter().rev() {
            let width = grid.dimensions().1;
            for (r, src_row) in grid.rows().enumerate() {
                let start = (row_off + r) * cols + col_off;
                dst[start..start + width].copy_from_slice(src_row);
            }
        }
    }

    debug!(
        "merged {} grids into {}x{} mosaic at {:?}",
        grids.len(),
        dimensions.0,
        dimensions.1,
        transform.origin
    );

    Ok(merged)
}
