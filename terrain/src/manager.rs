use crate::{
    constants::DEFAULT_STEP_SIZE_M,
    math::{interpolate_points, line, line_distance, linspace},
    Mosaic, Profile, TerrainError, TileStore,
};
use dem::{CellId, Elev, ElevationGrid, C};
use geo::geometry::{Coord, Point};
use log::debug;
use rayon::prelude::*;
use std::{
    collections::BTreeSet,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Instant,
};

/// Answers terrain queries from a mosaic that grows on demand.
///
/// Each query works out which cells its path crosses, pulls any it
/// hasn't seen from the [`TileStore`], and merges them into the
/// mosaic before sampling. Cells are never evicted.
///
/// A `TileManager` can be shared between threads. Fetching and
/// merging happen under an exclusive lock, so readers always see a
/// complete mosaic.
pub struct TileManager<S> {
    /// Where missing cells come from.
    store: S,

    /// Maximum distance between profile samples, in meters.
    step_size_m: C,

    /// Everything loaded so far.
    mosaic: RwLock<Mosaic>,
}

impl<S: TileStore> TileManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            step_size_m: DEFAULT_STEP_SIZE_M,
            mosaic: RwLock::new(Mosaic::new()),
        }
    }

    /// Sets the maximum distance between profile samples.
    ///
    /// # Panics
    ///
    /// Panics if `meters` isn't a positive, finite number.
    #[must_use]
    pub fn with_step_size(mut self, meters: C) -> Self {
        assert!(
            meters.is_finite() && meters > 0.0,
            "invalid step size {meters}"
        );
        self.step_size_m = meters;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn step_size(&self) -> C {
        self.step_size_m
    }

    /// Returns a snapshot of the cells merged so far.
    pub fn loaded_cells(&self) -> Result<BTreeSet<CellId>, TerrainError> {
        Ok(self.read()?.cells().clone())
    }

    pub fn contains(&self, cell: CellId) -> Result<bool, TerrainError> {
        Ok(self.read()?.contains(cell))
    }

    /// Makes sure every cell in `cells` is part of the mosaic.
    ///
    /// Returns how many cells had to be fetched.
    pub fn load_cells<I>(&self, cells: I) -> Result<usize, TerrainError>
    where
        I: IntoIterator<Item = CellId>,
    {
        let wanted: BTreeSet<CellId> = cells.into_iter().collect();
        if self.read()?.missing(&wanted).is_empty() {
            return Ok(0);
        }

        let mut mosaic = self.write()?;
        // Someone else may have loaded some of these while we waited
        // for the lock.
        let missing: Vec<CellId> = mosaic.missing(&wanted).into_iter().collect();
        if missing.is_empty() {
            return Ok(0);
        }

        let now = Instant::now();
        let tiles = missing
            .par_iter()
            .map(|&cell| {
                debug!("resolving {cell}");
                self.store.resolve_cell(cell).map(|grid| (cell, grid))
            })
            .collect::<Result<Vec<(CellId, ElevationGrid)>, TerrainError>>()?;
        let fetch_runtime = now.elapsed();

        let now = Instant::now();
        mosaic.extend(tiles)?;
        let merge_runtime = now.elapsed();

        debug!(
            "loaded {} cells, mosaic now {} cells; fetch: {:?}, merge: {:?}",
            missing.len(),
            mosaic.cells().len(),
            fetch_runtime,
            merge_runtime
        );
        Ok(missing.len())
    }

    /// Returns the terrain elevation at `coord`, loading its cell if
    /// needed.
    pub fn elevation(&self, coord: Coord<C>) -> Result<Elev, TerrainError> {
        self.load_cells(CellId::touching(coord))?;
        self.read()?.elevation(coord)
    }

    /// Returns the terrain profile from `start` to `end`.
    ///
    /// Samples are spaced evenly along the straight lon/lat line, at
    /// most [`step_size`](Self::step_size) meters apart, and include
    /// both endpoints.
    pub fn profile(&self, start: Coord<C>, end: Coord<C>) -> Result<Profile, TerrainError> {
        let path = line(start, end);
        let distance = line_distance(&path).ok_or_else(|| {
            TerrainError::Geometry(format!(
                "no geodesic distance between {start:?} and {end:?}"
            ))
        })?;
        if distance <= 0.0 {
            return Err(TerrainError::Geometry(format!(
                "{start:?} and {end:?} are the same point"
            )));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (distance / self.step_size_m).ceil().max(1.0) as usize;

        let (points, path_runtime) = {
            let now = Instant::now();
            let points: Vec<Point<C>> = interpolate_points(&path, n).ok_or_else(|| {
                TerrainError::Geometry(format!(
                    "could not interpolate between {start:?} and {end:?}"
                ))
            })?;
            (points, now.elapsed())
        };

        self.load_cells(points.iter().flat_map(|point| CellId::touching(point.0)))?;

        let (terrain_elev_m, terrain_runtime) = {
            let now = Instant::now();
            let mosaic = self.read()?;
            let terrain_elev_m = points
                .iter()
                .map(|point| mosaic.elevation(point.0).map(C::from))
                .collect::<Result<Vec<C>, TerrainError>>()?;
            (terrain_elev_m, now.elapsed())
        };

        debug!(
            "profile; len: {}, path_exec: {:?}, terrain_exec: {:?}",
            points.len(),
            path_runtime,
            terrain_runtime
        );

        Ok(Profile {
            distance,
            distances_m: linspace(0.0, distance, n + 1).collect(),
            points,
            terrain_elev_m,
        })
    }
}

/// Private API.
impl<S> TileManager<S> {
    fn read(&self) -> Result<RwLockReadGuard<'_, Mosaic>, TerrainError> {
        self.mosaic.read().map_err(|_| TerrainError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Mosaic>, TerrainError> {
        self.mosaic.write().map_err(|_| TerrainError::Poisoned)
    }
}
